//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, runtime and service creation to
//! keep command handlers short.

use crate::error::CliError;
use imageslicer::config::ConfigFile;
use imageslicer::logging::{init_logging, split_log_path, LoggingGuard};
use imageslicer::service::DefaultSliceService;
use std::future::Future;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    runtime: tokio::runtime::Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `verbose` - Mirror log events to stdout
    pub fn new(debug_mode: bool, verbose: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, verbose, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("imageslicer")
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("imageslicer v{}", imageslicer::VERSION);
        info!("imageslicer CLI: {} command", command);
    }

    /// Create a service from `config` (usually [`config`](Self::config) with
    /// command-line overrides applied).
    pub fn create_service(&self, config: &ConfigFile) -> Result<DefaultSliceService, CliError> {
        DefaultSliceService::from_config(config)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Service created successfully"))
    }

    /// Drive `future` to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
