use google_sheets4::{hyper, hyper_rustls};

pub type Connector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<Connector>;

/// One client shared by the OAuth flow and the Sheets hub.
///
/// Fails when the platform certificate store cannot be read.
pub fn http_client() -> std::io::Result<HttpClient> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
