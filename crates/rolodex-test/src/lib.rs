//! Rolodex `CardDAV` server - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach the full
//! router and the store through one path.

pub mod app {
    pub use rolodex_app::*;

    pub mod api {
        pub use rolodex_app::app::api::*;
    }
}

pub mod component {
    pub use rolodex_core::*;

    pub mod config {
        pub use rolodex_app::config::ConfigHandler;
        pub use rolodex_core::config::*;
    }

    pub mod store {
        pub use rolodex_app::store_handler::StoreHandler;
        pub use rolodex_store::*;
    }
}

pub use rolodex_rfc as rfc;
pub use rolodex_service as service;
