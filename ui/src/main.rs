pub use app::App;

pub mod app;
mod dashboard;
mod data;
mod extension;
mod forms;
mod home;
mod page;
mod storage;
#[cfg(test)]
mod test_server;

use cli_log::*;
use keyring::Entry;
use lazy_static::lazy_static;

use crate::page::ACCESS_TOKEN_KEY;

lazy_static! {
    static ref TOKEN_MANAGER: Entry =
        Entry::new("instamark", ACCESS_TOKEN_KEY).expect("Failed to create token manager");
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    init_cli_log!("instamark");
    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = match App::new().await {
        Ok(app) => app.run(terminal).await,
        Err(e) => Err(e),
    };
    ratatui::restore();
    result
}
