//! thing's entry point.
//! Parses the command line and hands over to the pipeline.

use thing::{
    cli::{get_args, Args, Command},
    error::{default_error_handler, ThingResult},
    loader::{github::GitHubHost, Settings, TemplateResolver},
    logger::init_logger,
    pipeline::Pipeline,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> ThingResult<()> {
    match args.command {
        Command::New { name, template } => {
            let settings = Settings::from_env()?;
            let host = GitHubHost::new(&settings)?;
            let resolver = TemplateResolver::new(&host, settings.cache_root);
            let engine = MiniJinjaRenderer::new();
            let prompt = DialoguerPrompter::new();
            let base_dir = std::env::current_dir()?;

            Pipeline::new(&resolver, &engine, &prompt, base_dir)
                .run(&name, &template)?;
            Ok(())
        }
    }
}
