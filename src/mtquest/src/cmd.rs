pub mod arc;
pub mod hash;
pub mod quest;

/// Represents a command in the mtquest application.
pub trait Command {
    /// Consumes a command object and executes the handler actions
    /// associated with it.
    ///
    /// On failure, an error will be reported.
    fn handle(self) -> eyre::Result<()>;
}
