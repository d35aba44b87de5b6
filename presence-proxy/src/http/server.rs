use crate::aggregator::Aggregator;
use crate::discord::PresenceSource;
use crate::{Config, Result};

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::Filter;

pub struct Server<T: PresenceSource> {
    pub config: Config,
    pub aggregator: Aggregator<T>,
}

impl<T: PresenceSource + 'static> Server<T> {
    pub fn new(config: Config, aggregator: Aggregator<T>) -> Server<T> {
        Server { config, aggregator }
    }

    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.config.server_addr.parse()?;

        info!(%addr, "Starting server");
        warp::serve(Arc::new(self).routes()).run(addr).await;

        Ok(())
    }

    pub fn routes(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let ping = warp::get()
            .and(warp::path("ping"))
            .and(warp::path::end())
            .and_then(super::routes::ping);

        let presence = warp::get()
            .and(warp::path!("api" / "discord"))
            .and(with_server(self))
            .and_then(super::routes::presence::<T>);

        ping.or(presence).with(warp::log("presence_proxy"))
    }
}

fn with_server<T: PresenceSource>(
    server: Arc<Server<T>>,
) -> impl Filter<Extract = (Arc<Server<T>>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&server))
}
