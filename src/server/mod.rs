pub mod api;
pub mod websocket;

use crate::cli::Args;
use crate::reframe::Reframer;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    reframer: Arc<Reframer>,
    args: Args,
}

impl Server {
    pub fn new(addr: String, reframer: Arc<Reframer>, args: Args) -> Self {
        Self { addr, reframer, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(http_port) = self.args.http_port {
            self.start_http_server(http_port).await?;
        }

        self.start_ws_server().await?;

        Ok(())
    }

    async fn start_http_server(&self, http_port: u16) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(http_port, self.reframer.clone(), self.addr.clone()).await
    }

    async fn start_ws_server(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        websocket::start_ws_server(&self.addr, self.reframer.clone()).await
    }
}
