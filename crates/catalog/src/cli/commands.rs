//! # CLI Layer
//!
//! 1. **Argument Parsing**: shell arguments into typed commands via clap
//! 2. **Logging**: a `tracing-subscriber` writing to stderr
//! 3. **Context Setup**: [`initialize`] resolves the data dir, config and store
//! 4. **Dispatch**: each subcommand maps to one API call
//! 5. **Exit Codes**: [`exit_code`] maps the error kind to a status
//!
//! Ids and value types arrive as strings and are parsed here, so a malformed
//! id is reported like any other validation error.

use super::render::{delete_summary, detail_view, print_json, value_views};
use super::setup::{
    CategoryCommands, Cli, Commands, FeatureCommands, ResourceCommands, SlotArgs, ValueCommands,
};
use anyhow::Result;
use catalogapp::api::CatalogApi;
use catalogapp::error::{CatalogError, ErrorKind};
use catalogapp::init::{initialize, DynStore};
use catalogapp::model::{FeatureUpdate, NewFeature, NewResource, ResourceUpdate};
use catalogapp::values::{ValueSlots, ValueType};
use clap::Parser;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CATALOG_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data.clone())?;
    debug!(data_dir = %ctx.data_dir.display(), "Catalog ready");

    dispatch(&ctx.api, cli.command)
}

/// Map a failure to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CatalogError>().map(CatalogError::kind) {
        Some(ErrorKind::Validation) | Some(ErrorKind::TypeMismatch) => 2,
        Some(ErrorKind::Reference) => 3,
        Some(ErrorKind::NotFound) => 4,
        Some(ErrorKind::Storage) => 5,
        None => 1,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(api: &CatalogApi<DynStore>, command: Commands) -> Result<()> {
    match command {
        Commands::Types => print_json(api.value_types()),
        Commands::Category(cmd) => category(api, cmd),
        Commands::Feature(cmd) => feature(api, cmd),
        Commands::Resource(cmd) => resource(api, cmd),
        Commands::Value(cmd) => value(api, cmd),
        Commands::Doctor => print_json(&api.doctor()?),
        Commands::Seed { if_empty } => {
            let added = if if_empty {
                api.seed_if_empty()?.unwrap_or_default()
            } else {
                api.seed_demo()?
            };
            print_json(&added)
        }
        Commands::Stats => print_json(&api.stats()?),
    }
}

fn category(api: &CatalogApi<DynStore>, cmd: CategoryCommands) -> Result<()> {
    match cmd {
        CategoryCommands::Create { name } => print_json(&api.create_category(&name)?),
        CategoryCommands::Get { id } => print_json(&api.get_category(parse(&id)?)?),
        CategoryCommands::List => print_json(&api.list_categories()?),
        CategoryCommands::Update { id, name } => {
            print_json(&api.update_category(parse(&id)?, &name)?)
        }
        CategoryCommands::Delete { id } => {
            print_json(&delete_summary(&api.delete_category(parse(&id)?)?))
        }
    }
}

fn feature(api: &CatalogApi<DynStore>, cmd: FeatureCommands) -> Result<()> {
    match cmd {
        FeatureCommands::Create {
            name,
            value_type,
            category,
        } => {
            let input = NewFeature::new(name, parse::<ValueType>(&value_type)?, parse(&category)?);
            print_json(&api.create_feature(input)?)
        }
        FeatureCommands::Get { id } => print_json(&api.get_feature(parse(&id)?)?),
        FeatureCommands::List { category: None } => print_json(&api.list_features()?),
        FeatureCommands::List {
            category: Some(category),
        } => print_json(&api.list_features_by_category(parse(&category)?)?),
        FeatureCommands::Update {
            id,
            name,
            value_type,
            category,
        } => {
            let patch = FeatureUpdate {
                name,
                value_type: value_type.as_deref().map(parse).transpose()?,
                category_id: category.as_deref().map(parse).transpose()?,
            };
            print_json(&api.update_feature(parse(&id)?, patch)?)
        }
        FeatureCommands::Delete { id } => {
            print_json(&delete_summary(&api.delete_feature(parse(&id)?)?))
        }
    }
}

fn resource(api: &CatalogApi<DynStore>, cmd: ResourceCommands) -> Result<()> {
    match cmd {
        ResourceCommands::Create {
            name,
            quantity,
            inactive,
            category,
        } => {
            let input = NewResource::new(name, quantity, parse(&category)?).with_status(!inactive);
            print_json(&api.create_resource(input)?)
        }
        ResourceCommands::Get { id } => print_json(&api.get_resource(parse(&id)?)?),
        ResourceCommands::List { category: None } => print_json(&api.list_resources()?),
        ResourceCommands::List {
            category: Some(category),
        } => print_json(&api.list_resources_by_category(parse(&category)?)?),
        ResourceCommands::Update {
            id,
            name,
            quantity,
            status,
            category,
        } => {
            let patch = ResourceUpdate {
                name,
                quantity,
                status,
                category_id: category.as_deref().map(parse).transpose()?,
            };
            print_json(&api.update_resource(parse(&id)?, patch)?)
        }
        ResourceCommands::Delete { id } => {
            print_json(&delete_summary(&api.delete_resource(parse(&id)?)?))
        }
    }
}

fn value(api: &CatalogApi<DynStore>, cmd: ValueCommands) -> Result<()> {
    match cmd {
        ValueCommands::Create {
            resource,
            feature,
            slots,
        } => {
            let created =
                api.create_feature_value(parse(&resource)?, parse(&feature)?, to_slots(slots))?;
            print_json(&created.view())
        }
        ValueCommands::Get {
            id,
            detail: true,
            resource: _,
        } => print_json(&detail_view(&api.get_feature_value_detail(parse(&id)?)?)),
        ValueCommands::Get {
            id,
            detail: false,
            resource: Some(resource),
        } => print_json(
            &api.get_feature_value_for_resource(parse(&resource)?, parse(&id)?)?
                .view(),
        ),
        ValueCommands::Get {
            id,
            detail: false,
            resource: None,
        } => print_json(&api.get_feature_value(parse(&id)?)?.view()),
        ValueCommands::List { resource, feature } => {
            let values = match (resource, feature) {
                (Some(resource), _) => api.list_feature_values_by_resource(parse(&resource)?)?,
                (None, Some(feature)) => api.list_feature_values_by_feature(parse(&feature)?)?,
                (None, None) => api.list_feature_values()?,
            };
            print_json(&value_views(&values))
        }
        ValueCommands::Update {
            id,
            resource: Some(resource),
            slots,
        } => print_json(
            &api.update_feature_value_for_resource(parse(&resource)?, parse(&id)?, to_slots(slots))?
                .view(),
        ),
        ValueCommands::Update {
            id,
            resource: None,
            slots,
        } => print_json(&api.update_feature_value(parse(&id)?, to_slots(slots))?.view()),
        ValueCommands::Delete {
            id,
            resource: Some(resource),
        } => print_json(
            &api.delete_feature_value_for_resource(parse(&resource)?, parse(&id)?)?
                .view(),
        ),
        ValueCommands::Delete { id, resource: None } => {
            print_json(&api.delete_feature_value(parse(&id)?)?.view())
        }
    }
}

fn to_slots(args: SlotArgs) -> ValueSlots {
    ValueSlots {
        value_string: args.value_string,
        value_number: args.value_number,
        value_boolean: args.value_boolean,
    }
}

/// Parse an id or type name, keeping the library's error kind.
fn parse<T>(s: &str) -> std::result::Result<T, CatalogError>
where
    T: FromStr<Err = CatalogError>,
{
    s.parse()
}
