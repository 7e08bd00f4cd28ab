mod export_configuration;

pub use export_configuration::ExportConfiguration;
