// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB and mail-relay adapters
// - presentation: HTTP handlers, routing and HTML views
// - application: access policy, use cases and domain services
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
