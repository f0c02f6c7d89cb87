use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use sea_orm::ConnectOptions;
use tracing::info;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub device_api: Option<DeviceApiConfig>,
}

#[derive(Clone)]
pub struct DeviceApiConfig {
    pub base_url: String,
    pub api_key: String,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        device_api: load_device_api(),
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

fn load_device_api() -> Option<DeviceApiConfig> {
    info!("Loading environment `DEVICE_API_URL` / `DEVICE_API_KEY`");

    let base_url = env::var("DEVICE_API_URL").ok()?;
    let api_key = env::var("DEVICE_API_KEY").unwrap_or_default();

    Some(DeviceApiConfig { base_url, api_key })
}
