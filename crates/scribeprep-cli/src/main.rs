use scribeprep_lib::cli::{
    ResolvedCommand, parse_args, resolve_command, run_provision, run_serve,
};
use scribeprep_lib::error::ScribePrepError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), ScribePrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Provision(params) => run_provision(params).await?,
        ResolvedCommand::Serve(params) => run_serve(params).await?,
    }

    Ok(())
}
