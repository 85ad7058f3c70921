use clap::Args;
use mtquest_arc::ext;
use mtquest_utils::hash::type_hash;

use super::Command;

/// Subcommand for computing the type hash of a resource class.
#[derive(Debug, Args)]
pub struct Hash {
    /// The resource class name, e.g. `rGUIMessage`.
    type_name: String,
}

impl Command for Hash {
    fn handle(self) -> eyre::Result<()> {
        let hash = type_hash(&self.type_name);
        match ext::resolve(hash) {
            "" => println!("0x{hash:08X}"),
            ext => println!("0x{hash:08X} {ext}"),
        }

        Ok(())
    }
}
