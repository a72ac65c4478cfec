//! NetBox API client
//!
//! Routes are resolved against the normalized base URL, e.g. with a base of
//! `http://netbox/api/` the route `dcim/devices/` targets
//! `http://netbox/api/dcim/devices/`.

use crate::auth::Authentication;
use crate::common::route;
use crate::common::{PaginatedResponse, RequestOptions};
use crate::config::ClientConfig;
use crate::error::NetBoxError;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    client: Client,
    base_url: String,
    auth: Authentication,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "http://netbox/api"); scheme and trailing slash are added if missing
    /// * `auth` - Credentials attached to every request
    pub fn new(base_url: &str, auth: Authentication) -> Result<Self, NetBoxError> {
        let client = Client::builder().build()?;
        Ok(Self::with_http_client(client, base_url, auth))
    }

    /// Create a client from optional login, password and token
    ///
    /// Fails with [`NetBoxError::InvalidConfig`] when the credentials do not
    /// describe exactly one authentication mode.
    pub fn from_parts(
        base_url: &str,
        login: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self, NetBoxError> {
        Self::new(base_url, Authentication::from_parts(login, password, token)?)
    }

    /// Create a client from a [`ClientConfig`]
    pub fn from_config(config: &ClientConfig) -> Result<Self, NetBoxError> {
        let auth = config.authentication()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(builder.build()?, &config.url, auth))
    }

    /// Wrap an already configured `reqwest` client
    pub fn with_http_client(client: Client, base_url: &str, auth: Authentication) -> Self {
        Self {
            client,
            base_url: route::normalize_base_url(base_url),
            auth,
        }
    }

    /// Get the normalized base URL (always ends with `/`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured authentication mode
    pub fn authentication(&self) -> &Authentication {
        &self.auth
    }

    /// Route of a model collection relative to the base URL
    pub fn build_model_route(&self, app: &str, model: &str) -> String {
        route::build_model_route(app, model)
    }

    /// Absolute URL of a model collection
    pub fn build_model_url(&self, app: &str, model: &str) -> String {
        format!("{}{}", self.base_url, self.build_model_route(app, model))
    }

    /// Build a full URL from a route
    pub fn build_url(&self, route: &str) -> String {
        route::join(&self.base_url, route)
    }

    fn prepare(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        self.auth.apply(request)
    }

    /// Issue a request and return the response as is
    ///
    /// Every verb method goes through here. The status code is not
    /// inspected; a 404 or 500 comes back as an `Ok` response. Only
    /// transport failures are errors.
    pub async fn request(
        &self,
        method: Method,
        route: &str,
        options: RequestOptions,
    ) -> Result<Response, NetBoxError> {
        let params: Vec<(&str, &str)> = options
            .query_params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let url = route::with_query(&self.build_url(route), &params);
        debug!("{} {}", method, url);

        let mut request = self.prepare(method, &url);
        if let Some(body) = options.json_body() {
            request = request.json(body);
        }
        if !options.header_map().is_empty() {
            request = request.headers(options.header_map().clone());
        }

        Ok(request.send().await?)
    }

    /// Make a GET request and decode the JSON response
    ///
    /// # Arguments
    /// * `route` - Route relative to the base URL (e.g., "dcim/devices/")
    /// * `params` - Query parameters (e.g., [("name", "edge-01")])
    pub async fn get<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<T, NetBoxError> {
        self.get_with(route, RequestOptions::new().queries(params)).await
    }

    /// GET with arbitrary query parameters and headers, decoding the JSON response
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        route: &str,
        options: RequestOptions,
    ) -> Result<T, NetBoxError> {
        self.send_json(Method::GET, route, options).await
    }

    /// Fetch all pages of a paginated collection
    ///
    /// Follows the `next` links NetBox returns until the last page.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, NetBoxError> {
        self.get_all_with(route, RequestOptions::new().queries(params)).await
    }

    /// Fetch all pages, sending `options` with every page request
    ///
    /// Query parameters only apply to the first page; later pages use the
    /// query NetBox encodes in `next`. Links pointing at another origin are
    /// moved onto the base URL so credentials never leave it.
    pub async fn get_all_with<T: DeserializeOwned>(
        &self,
        route: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>, NetBoxError> {
        let page_options = options.clone().without_query();
        let mut page: PaginatedResponse<T> = self.send_json(Method::GET, route, options).await?;
        let mut all_results = Vec::new();

        loop {
            all_results.extend(page.results);

            let Some(next) = page.next else { break };
            let url = route::rebase_link(&self.base_url, &next).ok_or_else(|| {
                NetBoxError::Api(format!("Cannot follow pagination link: {}", next))
            })?;
            debug!("Fetching page: {}", url);
            page = self.send_json(Method::GET, &url, page_options.clone()).await?;
        }

        Ok(all_results)
    }

    /// Make a POST request with a JSON body and decode the JSON response
    pub async fn post<T, B>(&self, route: &str, body: &B) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with(route, body, RequestOptions::new()).await
    }

    /// POST with extra query parameters and headers
    ///
    /// `body` replaces any JSON body already set on `options`.
    pub async fn post_with<T, B>(
        &self,
        route: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = options.json(serde_json::to_value(body)?);
        self.send_json(Method::POST, route, options).await
    }

    /// Make a PUT request with a JSON body and decode the JSON response
    pub async fn put<T, B>(&self, route: &str, body: &B) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put_with(route, body, RequestOptions::new()).await
    }

    /// PUT with extra query parameters and headers
    pub async fn put_with<T, B>(
        &self,
        route: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = options.json(serde_json::to_value(body)?);
        self.send_json(Method::PUT, route, options).await
    }

    /// Make a PATCH request with a JSON body and decode the JSON response
    pub async fn patch<T, B>(&self, route: &str, body: &B) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_with(route, body, RequestOptions::new()).await
    }

    /// PATCH with extra query parameters and headers
    pub async fn patch_with<T, B>(
        &self,
        route: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, NetBoxError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = options.json(serde_json::to_value(body)?);
        self.send_json(Method::PATCH, route, options).await
    }

    /// Make a DELETE request
    ///
    /// NetBox answers a successful delete with an empty 204, so the raw
    /// response is returned for the caller to inspect.
    pub async fn delete(&self, route: &str) -> Result<Response, NetBoxError> {
        self.delete_with(route, RequestOptions::new()).await
    }

    /// DELETE with query parameters, headers or a body (NetBox bulk delete)
    pub async fn delete_with(
        &self,
        route: &str,
        options: RequestOptions,
    ) -> Result<Response, NetBoxError> {
        self.request(Method::DELETE, route, options).await
    }

    /// Query the NetBox status endpoint
    ///
    /// Lightweight authenticated request, useful to check connectivity and
    /// credentials before issuing real work.
    pub async fn status(&self) -> Result<serde_json::Value, NetBoxError> {
        self.get("status/", &[]).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &str,
        options: RequestOptions,
    ) -> Result<T, NetBoxError> {
        let response = self.request(method.clone(), route, options).await?;
        decode(response, method.as_str(), route).await
    }
}

/// Map a non-success status to an error, otherwise decode the JSON body
async fn decode<T: DeserializeOwned>(
    response: Response,
    method: &str,
    route: &str,
) -> Result<T, NetBoxError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match status {
            StatusCode::NOT_FOUND => {
                NetBoxError::NotFound(format!("Resource not found: {} - {}", route, body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NetBoxError::Authentication(
                format!("{} {} rejected: {} - {}", method, route, status, body),
            ),
            _ => NetBoxError::Api(format!("{} {} failed: {} - {}", method, route, status, body)),
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
