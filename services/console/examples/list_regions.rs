//! List regions of the console with credentials from env.
//!
//! ```shell
//! JUICEFS_CLOUD_ACCESS_KEY=xxx JUICEFS_CLOUD_SECRET_KEY=xxx cargo run --example list_regions
//! ```

use jfsign_console::{Client, Config};
use jfsign_core::{Context, OsEnv, Result};
use jfsign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_config(ctx, Config::default()).await?;

    for region in client.list_regions().await? {
        println!("{}\t{}\t{}", region.id, region.name, region.desp);
    }
    Ok(())
}
