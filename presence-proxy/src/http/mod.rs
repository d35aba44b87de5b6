mod server;
pub use server::Server;

mod routes;
