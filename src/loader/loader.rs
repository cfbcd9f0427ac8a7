use std::path::Path;

use reqwest::Client;
use url::Url;

use super::error::LoadError;
use super::options::FetchOptions;
use super::source::Source;
use crate::descriptor::Descriptor;
use crate::render::{MapView, OutputRegion, Renderer};

pub struct Loader {
    client: Client,
    allowed_hosts: Vec<String>,
}

impl Loader {
    pub fn new(options: &FetchOptions) -> Result<Self, LoadError> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(LoadError::Client)?;

        Ok(Self {
            client,
            allowed_hosts: options.allowed_hosts.clone(),
        })
    }

    /// Parse a user-supplied URL and check it against the scheme and host
    /// restrictions.
    pub fn check_url(&self, raw: &str) -> Result<Url, LoadError> {
        let invalid = |reason: &str| LoadError::InvalidUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("only http and https are supported"));
        }

        if !self.allowed_hosts.is_empty() {
            let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
            if !self.allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
                return Err(invalid("host not allowed"));
            }
        }

        Ok(url)
    }

    /// GET a descriptor. Anything other than a 2xx response is an error.
    pub async fn fetch(&self, url: &Url) -> Result<Descriptor, LoadError> {
        let request_error = |source: reqwest::Error| LoadError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        Ok(Descriptor::from_json(&body)?)
    }

    /// Read a descriptor from disk.
    pub async fn read_file(path: &Path) -> Result<Descriptor, LoadError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Descriptor::from_json(&text)?)
    }

    pub async fn load(&self, source: &Source) -> Result<Descriptor, LoadError> {
        match source {
            Source::Url(url) => self.fetch(url).await,
            Source::File(path) => Self::read_file(path).await,
        }
    }

    /// Fetch a descriptor and render it. Nothing is drawn unless the request
    /// succeeds and the body parses.
    pub async fn load_from_network<M, O>(
        &self,
        url: &Url,
        renderer: &Renderer,
        map: &mut M,
        output: &mut O,
    ) -> Result<(), LoadError>
    where
        M: MapView + ?Sized,
        O: OutputRegion + ?Sized,
    {
        let descriptor = self
            .fetch(url)
            .await
            .inspect_err(|e| log::warn!("network load failed: {}", e))?;
        renderer.render(&descriptor, map, output)?;
        Ok(())
    }

    /// Read a selected file and render it. Parse errors surface before any
    /// drawing happens.
    pub async fn load_from_local_selection<M, O>(
        &self,
        path: &Path,
        renderer: &Renderer,
        map: &mut M,
        output: &mut O,
    ) -> Result<(), LoadError>
    where
        M: MapView + ?Sized,
        O: OutputRegion + ?Sized,
    {
        let descriptor = Self::read_file(path)
            .await
            .inspect_err(|e| log::warn!("file load failed: {}", e))?;
        renderer.render(&descriptor, map, output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::fixtures::TEST_SITE;
    use crate::render::{Page, Scene};
    use axum::{http::StatusCode, routing::get, Router};
    use std::net::SocketAddr;
    use std::path::PathBuf;

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route("/site.json", get(|| async { TEST_SITE }))
            .route("/broken.json", get(|| async { "{\"name\": \"Test" }))
            .route(
                "/wrong-shape.json",
                get(|| async { r#"{"name": "x", "lrp": {"erp": 1}}"# }),
            )
            .route(
                "/gone.json",
                get(|| async { (StatusCode::NOT_FOUND, TEST_SITE) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn url(addr: SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", addr, path)).unwrap()
    }

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("splat-webmap-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn loader() -> Loader {
        Loader::new(&FetchOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn network_load_renders_descriptor() {
        let addr = spawn_server().await;
        let mut scene = Scene::new();
        let mut page = Page::default();

        loader()
            .load_from_network(&url(addr, "/site.json"), &Renderer::default(), &mut scene, &mut page)
            .await
            .unwrap();

        assert_eq!(scene.view.as_ref().unwrap().center, [40.0, -74.0]);
        assert_eq!(scene.overlays().count(), 1);
        assert_eq!(scene.markers().count(), 1);
        assert!(page.regions().contains_key("info"));
    }

    #[tokio::test]
    async fn network_failures_leave_no_trace() {
        let addr = spawn_server().await;
        let loader = loader();
        let renderer = Renderer::default();

        for path in ["/broken.json", "/wrong-shape.json", "/gone.json", "/nope.json"] {
            let mut scene = Scene::new();
            let mut page = Page::default();
            let result = loader
                .load_from_network(&url(addr, path), &renderer, &mut scene, &mut page)
                .await;

            assert!(result.is_err(), "{} should fail", path);
            assert!(scene.view.is_none(), "{} moved the view", path);
            assert!(scene.layers.is_empty(), "{} added layers", path);
            assert!(page.regions().is_empty(), "{} wrote output", path);
        }
    }

    #[tokio::test]
    async fn network_errors_are_classified() {
        let addr = spawn_server().await;
        let loader = loader();

        let err = loader.fetch(&url(addr, "/gone.json")).await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));

        let err = loader.fetch(&url(addr, "/broken.json")).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Descriptor(crate::descriptor::DescriptorError::Json(_))
        ));

        let err = loader.fetch(&url(addr, "/wrong-shape.json")).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Descriptor(crate::descriptor::DescriptorError::Shape(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = loader().fetch(&url(addr, "/site.json")).await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
    }

    #[tokio::test]
    async fn local_selection_renders_descriptor() {
        let path = temp_file(TEST_SITE);
        let mut scene = Scene::new();
        let mut page = Page::default();

        loader()
            .load_from_local_selection(&path, &Renderer::default(), &mut scene, &mut page)
            .await
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(scene.overlays().next().unwrap().url, "out.png");
        assert!(page.regions()["info"].starts_with("<pre>"));
    }

    #[tokio::test]
    async fn malformed_local_file_fails_before_rendering() {
        let path = temp_file("{\"name\": ");
        let mut scene = Scene::new();
        let mut page = Page::default();

        let err = loader()
            .load_from_local_selection(&path, &Renderer::default(), &mut scene, &mut page)
            .await
            .unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, LoadError::Descriptor(_)));
        assert!(scene.view.is_none());
        assert!(scene.layers.is_empty());
        assert!(page.regions().is_empty());
    }

    #[tokio::test]
    async fn missing_local_file_is_a_read_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let err = Loader::read_file(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn load_dispatches_on_source() {
        let addr = spawn_server().await;
        let path = temp_file(TEST_SITE);
        let loader = loader();

        let remote = loader.load(&Source::Url(url(addr, "/site.json"))).await.unwrap();
        let local = loader.load(&Source::File(path.clone())).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(remote, local);
    }

    #[test]
    fn check_url_rejects_other_schemes() {
        let err = loader().check_url("ftp://example.org/site.json").unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
        assert!(loader().check_url("not a url").is_err());
    }

    #[test]
    fn check_url_applies_host_allow_list() {
        let loader = Loader::new(&FetchOptions {
            allowed_hosts: vec!["coverage.example.org".into()],
            ..FetchOptions::default()
        })
        .unwrap();

        assert!(loader.check_url("https://Coverage.Example.org/a.json").is_ok());
        assert!(loader.check_url("http://127.0.0.1/a.json").is_err());
    }
}
