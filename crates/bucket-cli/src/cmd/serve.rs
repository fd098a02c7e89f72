use anyhow::Result;
use bucket_core::config::ProxyConfig;

pub fn run(
    token: Option<String>,
    upstream_url: Option<String>,
    port: Option<u16>,
    open_browser: bool,
) -> Result<()> {
    let config = ProxyConfig::new(token, upstream_url, port)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
        let url = format!("http://localhost:{}", listener.local_addr()?.port());
        println!("Bucket timeline → {url}");

        tokio::select! {
            res = bucket_server::serve_on(config, listener, open_browser) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
