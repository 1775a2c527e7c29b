/// This module contains the domain logic for the application data transfer.
///
/// DTOs are used to transfer data between the application layers. The domain
/// layer does not depend on any other layer, so the command line ports can
/// build their arguments directly into these types.
///
pub mod dtos;

/// Errors raised by the domain and the use cases.
pub mod errors;
