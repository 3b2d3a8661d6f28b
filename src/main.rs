use clap::Parser;
use service_deploy::utils::error::{DeployError, ErrorSeverity};
use service_deploy::utils::{logger, validation::Validate};
use service_deploy::{CliConfig, Deployer, HttpDeployClient, PlatformConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting service-deploy");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Deployment failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), DeployError> {
    if let Some(manifest) = config.dry_run_manifest()? {
        tracing::info!("🔍 DRY RUN MODE - nothing will be submitted");
        println!("{}", manifest);
        return Ok(());
    }

    let plan = config.plan()?;

    let platform = PlatformConfig::from_env()?;
    platform.validate()?;
    tracing::debug!("Platform config: {:?}", platform);

    let deployer = Deployer::new(HttpDeployClient::new(platform));
    let deployment = deployer
        .run(&plan.service, &plan.workspace_fqn, plan.wait)
        .await?;

    println!("✅ Deployment {} submitted ({})", deployment.id, deployment.status);
    Ok(())
}
