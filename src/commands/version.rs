use super::Report;

pub fn handle_version() -> Report {
    Report::Info(format!("husky-conf v{}", env!("CARGO_PKG_VERSION")))
}
