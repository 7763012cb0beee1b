use clap::Parser;
use vty_appdesc::config::Command;
use vty_appdesc::utils::logger;
use vty_appdesc::{AppCatalog, AppDescError, AppDescriptor, AppRegistry, CliConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json);
    tracing::debug!("CLI config: {:?}", config);

    let registry = match load_registry(config.registry.as_deref()) {
        Ok(registry) => registry,
        Err(e) => fail(&e),
    };

    if let Err(e) = run(&registry, &config) {
        match e.downcast_ref::<AppDescError>() {
            Some(err) => fail(err),
            None => return Err(e),
        }
    }

    Ok(())
}

fn load_registry(path: Option<&str>) -> vty_appdesc::Result<AppRegistry> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading registry from: {}", path);
            AppRegistry::from_file(path)
        }
        None => vty_appdesc::osmo_sip_connector(),
    }
}

fn fail(e: &AppDescError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn run(registry: &AppRegistry, config: &CliConfig) -> anyhow::Result<()> {
    match &config.command {
        Command::List => {
            if config.json {
                println!("{}", registry.to_json()?);
            } else {
                for app in registry.list_applications() {
                    print_descriptor(registry, app);
                }
            }
        }
        Command::Paths { app } => {
            let paths = registry.config_paths(app)?;
            if config.json {
                println!("{}", serde_json::to_string(paths)?);
            } else {
                for path in paths {
                    println!("{}", path);
                }
            }
        }
        Command::Launch { app } => {
            let descriptor = match app {
                Some(name) => registry.descriptor(name)?,
                None => registry.primary_app()?,
            };
            let spec = registry.build_launch_spec(descriptor)?;
            if config.json {
                println!("{}", serde_json::to_string(&spec)?);
            } else {
                println!("{}", spec);
            }
        }
        Command::Primary => {
            let app = registry.primary_app()?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(app)?);
            } else {
                print_descriptor(registry, app);
            }
        }
        Command::VtyCommand => {
            let spec = registry.vty_command()?;
            if config.json {
                println!("{}", serde_json::to_string(&spec)?);
            } else {
                println!("{}", spec);
            }
        }
    }
    Ok(())
}

fn print_descriptor(registry: &AppRegistry, app: &AppDescriptor) {
    println!(
        "{:<12} {:<24} vty={} exe={}",
        app.label,
        app.config_name,
        registry.vty_endpoint(app),
        app.executable_path
    );
}
