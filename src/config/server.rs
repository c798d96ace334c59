//! HTTP server defaults. Every value here can be overridden from the command line.

pub struct ServerDefaults {
    pub host: &'static str,
    pub port: u16,
    /// Serialized model record loaded once at startup
    pub model_path: &'static str,
    /// Directory served under `/static`
    pub static_dir: &'static str,
}

pub const SERVER: ServerDefaults = ServerDefaults {
    host: "127.0.0.1",
    port: 5000,
    model_path: "model/stock_price_prediction_model.mpk",
    static_dir: "static",
};
