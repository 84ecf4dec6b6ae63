mod api;
mod bridge;
mod chain;
mod config;
mod error;
mod progress;
mod quote;
mod route;
mod spoke_pool;

pub use {
    api::*,
    bridge::*,
    chain::*,
    config::*,
    error::*,
    progress::*,
    quote::*,
    route::*,
    spoke_pool::*,
};
