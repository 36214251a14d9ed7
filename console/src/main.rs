//! `engine-console`, a remote console for a running engine.
//!
//! Lines typed at the console are sent to the engine as script or command messages,
//! and the engine's output is printed as it arrives.

pub mod cli;
use cli::init;
use console_api::vocabulary::complete;

pub fn main() -> anyhow::Result<()> {
    let args = init();

    // create the dotdir path, so the modules don't need to worry about it.
    console_api::config::mkdir()?;

    if let Some(prefix) = args.value_of("COMPLETE") {
        for entry in complete(prefix) {
            println!("{}", entry);
        }

        Ok(())
    } else {
        console_command::command_main(args)
    }
}
