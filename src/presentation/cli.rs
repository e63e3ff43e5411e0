use crate::application::{dto::FeatureDto, UseCaseContainer};
use crate::domain::entities::{
    AppConfig, Environment, EnvironmentDirectory, SortOption, SortOrder, TagId, TagStrategy,
};
use crate::domain::services::EnvironmentKeyValidator;
use crate::infrastructure::http::{ApiClient, HttpEnvironmentRepository, HttpFeatureRepository};
use crate::infrastructure::ConfigRepository;
use crate::presentation::components::{FeatureFilterController, FilterUpdate};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "flagdeck")]
#[command(about = "Feature list filters for the flag admin console", long_about = None)]
pub struct Cli {
    /// API base url, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// API token, overrides the config file
    #[arg(long, global = true)]
    api_token: Option<String>,
    /// Config file to use instead of ~/.config/flagdeck/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a feature list page query, optionally changing filters
    Url {
        /// Query string as found in the page URL
        #[arg(default_value = "")]
        query: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the feature list request a page query turns into
    Api {
        #[command(flatten)]
        target: TargetArgs,
        /// JSON file with the project's environments, instead of asking the API
        #[arg(long)]
        environments: Option<PathBuf>,
    },
    /// Fetch one page of features
    List(TargetArgs),
    /// Show or change the stored configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct TargetArgs {
    /// Query string as found in the page URL
    #[arg(default_value = "")]
    query: String,
    /// Environment API key
    #[arg(short, long)]
    environment: String,
    /// Project id, defaults to the configured project
    #[arg(short, long)]
    project: Option<u64>,
    #[command(flatten)]
    filters: FilterArgs,
}

/// Filter changes applied on top of the query, in the order a user would
/// make them on the page.
#[derive(Args, Default)]
struct FilterArgs {
    /// Start from the default filters instead of the query
    #[arg(long)]
    clear: bool,
    /// Free-text search, an empty value removes it
    #[arg(long)]
    search: Option<String>,
    /// Tag ids to filter by
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<u64>,
    /// Only features without tags
    #[arg(long, conflicts_with = "tags")]
    untagged: bool,
    /// Match any selected tag instead of all of them
    #[arg(long)]
    union: bool,
    /// Owner user ids
    #[arg(long = "owner", value_delimiter = ',')]
    owners: Vec<u64>,
    /// Owner group ids
    #[arg(long = "group-owner", value_delimiter = ',')]
    group_owners: Vec<u64>,
    /// Include archived features
    #[arg(long)]
    archived: Option<bool>,
    /// Only enabled (true) or disabled (false) features
    #[arg(long)]
    enabled: Option<bool>,
    /// Search in feature values
    #[arg(long)]
    value_search: Option<String>,
    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending
    #[arg(long)]
    desc: bool,
    /// Page to show, applied after the filter changes
    #[arg(long)]
    page: Option<u32>,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Store values in the config file
    Set(ConfigSetArgs),
}

#[derive(Args)]
struct ConfigSetArgs {
    /// Project used when a command gets no --project
    #[arg(long)]
    default_project: Option<u64>,
    /// API base url
    #[arg(long)]
    url: Option<String>,
    /// API token, an empty value removes it
    #[arg(long)]
    token: Option<String>,
}

#[derive(Serialize)]
struct UrlReport {
    query: String,
    has_active_filters: bool,
}

#[derive(Serialize)]
struct ConfigReport {
    path: String,
    api_url: String,
    has_api_token: bool,
    default_project: Option<u64>,
}

pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Url { query, filters } => {
            let controller = filter_controller(query, filters);
            print_json(&UrlReport {
                query: controller.url_query(),
                has_active_filters: controller.has_active_filters(),
            })
        }
        Commands::Api {
            target,
            environments,
        } => {
            let config = load_config(&cli)?;
            let project_id = project_id(target, &config)?;
            EnvironmentKeyValidator::validate_api_key(&target.environment)
                .map_err(|e| anyhow!(e))?;

            let directory = match environments {
                Some(path) => read_environments(path)?,
                None => {
                    let container = use_cases(&config)?;
                    container.load_environments.execute(project_id).await?
                }
            };

            let controller = filter_controller(&target.query, &target.filters);
            match controller.api_query(&target.environment, project_id, &directory) {
                Some(query) => print_json(&query),
                None => Err(unresolved_environment(target, project_id)),
            }
        }
        Commands::List(target) => {
            let config = load_config(&cli)?;
            let project_id = project_id(target, &config)?;
            EnvironmentKeyValidator::validate_api_key(&target.environment)
                .map_err(|e| anyhow!(e))?;

            let controller = filter_controller(&target.query, &target.filters);
            let container = use_cases(&config)?;
            let page = container
                .list_features
                .execute(controller.filters(), &target.environment, project_id)
                .await?;

            match page {
                Some(page) => {
                    tracing::info!("{} features match", page.count);
                    let features: Vec<FeatureDto> =
                        page.results.into_iter().map(FeatureDto::from).collect();
                    print_json(&features)
                }
                None => Err(unresolved_environment(target, project_id)),
            }
        }
        Commands::Config(ConfigCommands::Show) => {
            let repository = config_repository(&cli);
            let config = load_config(&cli)?;
            print_json(&ConfigReport {
                path: repository.path().display().to_string(),
                api_url: config.api_url,
                has_api_token: config.api_token.is_some(),
                default_project: config.default_project,
            })
        }
        Commands::Config(ConfigCommands::Set(args)) => {
            let repository = config_repository(&cli);
            let mut config = repository.load()?;

            if let Some(project) = args.default_project {
                config.default_project = Some(project);
            }
            if let Some(url) = &args.url {
                ApiClient::new(url, None).context("Refusing to store an invalid API url")?;
                config.api_url = url.clone();
            }
            if let Some(token) = &args.token {
                config.api_token = Some(token.clone()).filter(|t| !t.is_empty());
            }

            repository.save(&config)?;
            tracing::info!("Saved config to {:?}", repository.path());
            Ok(())
        }
    }
}

/// Restores the page state from `query` and replays the requested changes.
fn filter_controller(query: &str, args: &FilterArgs) -> FeatureFilterController {
    let mut controller = FeatureFilterController::from_query(query);
    if args.clear {
        controller.clear();
    }

    let mut update = FilterUpdate::new();
    if let Some(search) = &args.search {
        update = update.with_search(Some(search.clone()).filter(|s| !s.is_empty()));
    }
    if args.untagged {
        update = update.with_tags(vec![TagId::Untagged]);
    } else if !args.tags.is_empty() {
        update = update.with_tags(args.tags.iter().copied().map(TagId::Id).collect());
    }
    if args.union {
        update = update.with_tag_strategy(TagStrategy::Union);
    }
    if !args.owners.is_empty() {
        update = update.with_owners(args.owners.clone());
    }
    if !args.group_owners.is_empty() {
        update = update.with_group_owners(args.group_owners.clone());
    }
    if let Some(archived) = args.archived {
        update = update.with_show_archived(archived);
    }
    if let Some(enabled) = args.enabled {
        update = update.with_is_enabled(Some(enabled));
    }
    if let Some(value_search) = &args.value_search {
        update = update.with_value_search(value_search.clone());
    }
    if args.sort.is_some() || args.desc {
        let field = args
            .sort
            .clone()
            .unwrap_or_else(|| controller.filters().sort.sort_by.clone());
        let order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
        update = update.with_sort(SortOption::from_field(&field, order));
    }

    if controller.set(update) {
        tracing::debug!("Filters changed, back to page 1");
    }
    if let Some(page) = args.page {
        controller.set_page(page);
    }
    controller
}

fn unresolved_environment(target: &TargetArgs, project_id: u64) -> anyhow::Error {
    anyhow!(
        "environment {} is not part of project {}, no request sent",
        target.environment,
        project_id
    )
}

fn config_repository(cli: &Cli) -> ConfigRepository {
    match &cli.config {
        Some(path) => ConfigRepository::with_path(path),
        None => ConfigRepository::new(),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = config_repository(cli).load_with_env()?;

    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(api_token) = &cli.api_token {
        config.api_token = Some(api_token.clone());
    }
    Ok(config)
}

fn project_id(target: &TargetArgs, config: &AppConfig) -> Result<u64> {
    target
        .project
        .or(config.default_project)
        .ok_or_else(|| anyhow!("no project given and no default_project configured"))
}

fn use_cases(config: &AppConfig) -> Result<UseCaseContainer> {
    let client = Arc::new(ApiClient::new(&config.api_url, config.api_token.clone())?);
    tracing::debug!("Using API at {}", client.base_url());

    Ok(UseCaseContainer::new(
        Arc::new(HttpEnvironmentRepository::new(Arc::clone(&client))),
        Arc::new(HttpFeatureRepository::new(client)),
    ))
}

fn read_environments(path: &Path) -> Result<EnvironmentDirectory> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read environments file {:?}", path))?;
    let environments: Vec<Environment> =
        serde_json::from_str(&content).context("Failed to parse environments file")?;
    Ok(EnvironmentDirectory::new(environments))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
