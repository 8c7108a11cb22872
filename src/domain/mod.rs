// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Commands
// - Errors
// - Lifecycle rules
// - Command handler
//
// ============================================================================

pub mod order;
