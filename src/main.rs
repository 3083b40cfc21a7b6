use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use agro_registry::{
    commands::{
        control_products::{
            ControlProductFields, CreateControlProductCommand, CreateFertilizerControlCommand,
            CreateFungusControlCommand, CreatePestControlCommand,
        },
        farms::CreateFarmCommand,
        labor_products::CreateLaborProductCommand,
        labors::CreateLaborCommand,
        nurseries::CreateNurseryCommand,
        producers::CreateProducerCommand,
    },
    config, db,
    entities::{self, LaborType},
    metrics, seed, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    if let Some(url) = cli.database_url.clone() {
        cfg.database_url = url;
    }

    if let Commands::Migrate(args) = &cli.command {
        return run_migrate(&cfg, args).await;
    }

    let state = AppState::connect(cfg)
        .await
        .context("failed to open the registry database")?;

    let result = match cli.command {
        Commands::Migrate(_) => Ok(()),
        Commands::Seed => handle_seed(&state, cli.json).await,
        Commands::Producers(command) => handle_producers_command(&state, command, cli.json).await,
        Commands::Farms(command) => handle_farms_command(&state, command, cli.json).await,
        Commands::Nurseries(command) => handle_nurseries_command(&state, command, cli.json).await,
        Commands::Products(command) => handle_products_command(&state, command, cli.json).await,
        Commands::Labors(command) => handle_labors_command(&state, command, cli.json).await,
        Commands::Summary => handle_summary(&state, cli.json).await,
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

#[derive(Parser)]
#[command(
    name = "agro-registry",
    about = "Registry of producers, farms, nurseries, control products and labors",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[arg(long, global = true, help = "Override the configured database URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply (or roll back) the schema migrations
    Migrate(MigrateArgs),
    /// Load a small demo data set
    Seed,
    #[command(subcommand)]
    Producers(ProducersCommands),
    #[command(subcommand)]
    Farms(FarmsCommands),
    #[command(subcommand)]
    Nurseries(NurseriesCommands),
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Labors(LaborsCommands),
    /// Row counts per table and the write counters
    Summary,
}

#[derive(Args)]
struct MigrateArgs {
    #[arg(long, help = "Roll back every migration before applying them again")]
    reset: bool,
}

#[derive(Subcommand)]
enum ProducersCommands {
    Create(CreateProducerArgs),
    List,
    Show {
        #[arg(long, help = "Identity document number")]
        document_number: String,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct CreateProducerArgs {
    #[arg(long)]
    document_type: String,
    #[arg(long)]
    document_number: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    surname: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[derive(Subcommand)]
enum FarmsCommands {
    Create {
        #[arg(long)]
        producer_id: Uuid,
        #[arg(long)]
        cadastral_number: String,
        #[arg(long)]
        municipality: String,
    },
    List {
        #[arg(long)]
        producer_id: Uuid,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum NurseriesCommands {
    Create {
        #[arg(long)]
        farm_id: Uuid,
        #[arg(long)]
        code: String,
        #[arg(long)]
        crop_type: String,
    },
    List {
        #[arg(long)]
        farm_id: Uuid,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProductKind {
    Generic,
    Fungus,
    Pest,
    Fertilizer,
}

#[derive(Subcommand)]
enum ProductsCommands {
    Create(CreateProductArgs),
    List,
    Show {
        #[arg(long)]
        id: Uuid,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct CreateProductArgs {
    #[arg(long, value_enum, default_value = "generic")]
    kind: ProductKind,
    #[arg(long)]
    name: String,
    #[arg(long)]
    registration_number: Option<String>,
    #[arg(long, help = "Days between applications")]
    frequency_days: i32,
    #[arg(long)]
    value: Option<Decimal>,
    #[arg(long, help = "Fungus and pest controls only")]
    withdrawal_period_days: Option<i32>,
    #[arg(long, help = "Fungus controls only")]
    fungus_name: Option<String>,
    #[arg(long, help = "Fertilizer controls only (YYYY-MM-DD)")]
    application_date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum LaborsCommands {
    Create {
        #[arg(long)]
        nursery_id: Uuid,
        #[arg(long, help = "Labor date (YYYY-MM-DD)")]
        date: NaiveDate,
        #[arg(long = "type", help = "FUNGUS_APPLICATION, PEST_APPLICATION, FERTILIZER_APPLICATION or OTHER")]
        labor_type: LaborType,
        #[arg(long)]
        description: Option<String>,
    },
    List {
        #[arg(long)]
        nursery_id: Uuid,
    },
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Record a product applied during a labor
    AddProduct {
        #[arg(long)]
        labor_id: Uuid,
        #[arg(long)]
        product_id: Uuid,
        #[arg(long)]
        quantity: Decimal,
        #[arg(long, help = "Application date (YYYY-MM-DD)")]
        date: NaiveDate,
    },
    /// Products applied during a labor
    Products {
        #[arg(long)]
        labor_id: Uuid,
    },
    /// Applications of one product across labors
    Applications {
        #[arg(long)]
        product_id: Uuid,
    },
    RemoveProduct {
        #[arg(long)]
        id: Uuid,
    },
}

async fn run_migrate(cfg: &config::AppConfig, args: &MigrateArgs) -> Result<()> {
    let pool = db::establish_connection_from_app_config(cfg).await?;
    if args.reset {
        db::reset_schema(&pool).await?;
    }
    db::run_migrations(&pool).await?;
    info!("Schema is up to date");
    println!("Migrations applied");
    db::close_pool(pool).await?;
    Ok(())
}

async fn handle_seed(state: &AppState, json: bool) -> Result<()> {
    let summary = seed::seed_demo_data(&state.services)
        .await
        .context("failed to seed demo data")?;
    if json {
        print_json(&serde_json::json!({
            "producers": summary.producers,
            "farms": summary.farms,
            "nurseries": summary.nurseries,
            "products": summary.products,
            "labors": summary.labors,
            "labor_products": summary.labor_products,
        }))?;
    } else {
        println!("{:#?}", summary);
    }
    Ok(())
}

async fn handle_producers_command(
    state: &AppState,
    command: ProducersCommands,
    json: bool,
) -> Result<()> {
    let service = &state.services.producers;
    match command {
        ProducersCommands::Create(args) => {
            let producer = service
                .create_producer(CreateProducerCommand {
                    document_type: Some(args.document_type),
                    document_number: Some(args.document_number),
                    name: Some(args.name),
                    surname: Some(args.surname),
                    phone: args.phone,
                    email: args.email,
                })
                .await?;
            print_one(&producer, json)
        }
        ProducersCommands::List => print_many(&service.list_producers().await?, json),
        ProducersCommands::Show { document_number } => {
            let producer = service
                .get_by_document_number(&document_number)
                .await?
                .ok_or_else(|| anyhow!("no producer with document number {}", document_number))?;
            print_one(&producer, json)
        }
        ProducersCommands::Delete { id } => {
            service.delete_producer(id).await?;
            println!("Producer {} deleted", id);
            Ok(())
        }
    }
}

async fn handle_farms_command(state: &AppState, command: FarmsCommands, json: bool) -> Result<()> {
    let service = &state.services.farms;
    match command {
        FarmsCommands::Create {
            producer_id,
            cadastral_number,
            municipality,
        } => {
            let farm = service
                .create_farm(CreateFarmCommand {
                    producer_id: Some(producer_id),
                    cadastral_number: Some(cadastral_number),
                    municipality: Some(municipality),
                })
                .await?;
            print_one(&farm, json)
        }
        FarmsCommands::List { producer_id } => {
            print_many(&service.list_farms_for_producer(producer_id).await?, json)
        }
        FarmsCommands::Delete { id } => {
            service.delete_farm(id).await?;
            println!("Farm {} deleted", id);
            Ok(())
        }
    }
}

async fn handle_nurseries_command(
    state: &AppState,
    command: NurseriesCommands,
    json: bool,
) -> Result<()> {
    let service = &state.services.nurseries;
    match command {
        NurseriesCommands::Create {
            farm_id,
            code,
            crop_type,
        } => {
            let nursery = service
                .create_nursery(CreateNurseryCommand {
                    farm_id: Some(farm_id),
                    code: Some(code),
                    crop_type: Some(crop_type),
                })
                .await?;
            print_one(&nursery, json)
        }
        NurseriesCommands::List { farm_id } => {
            print_many(&service.list_nurseries_for_farm(farm_id).await?, json)
        }
        NurseriesCommands::Delete { id } => {
            service.delete_nursery(id).await?;
            println!("Nursery {} deleted", id);
            Ok(())
        }
    }
}

async fn handle_products_command(
    state: &AppState,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    let service = &state.services.control_products;
    match command {
        ProductsCommands::Create(args) => {
            let base = ControlProductFields {
                registration_number: args.registration_number,
                name: Some(args.name),
                application_frequency_days: Some(args.frequency_days),
                value: args.value,
            };
            let details = match args.kind {
                ProductKind::Generic => {
                    let product = service
                        .create_product(CreateControlProductCommand { base })
                        .await?;
                    service.get_product(product.id).await?
                }
                ProductKind::Fungus => {
                    service
                        .create_fungus_control(CreateFungusControlCommand {
                            base,
                            withdrawal_period_days: args.withdrawal_period_days,
                            fungus_name: args.fungus_name,
                        })
                        .await?
                }
                ProductKind::Pest => {
                    service
                        .create_pest_control(CreatePestControlCommand {
                            base,
                            withdrawal_period_days: args.withdrawal_period_days,
                        })
                        .await?
                }
                ProductKind::Fertilizer => {
                    service
                        .create_fertilizer_control(CreateFertilizerControlCommand {
                            base,
                            application_date: args.application_date,
                        })
                        .await?
                }
            };
            print_one(&details, json)
        }
        ProductsCommands::List => print_many(&service.list_products().await?, json),
        ProductsCommands::Show { id } => print_one(&service.get_product(id).await?, json),
        ProductsCommands::Delete { id } => {
            service.delete_product(id).await?;
            println!("Control product {} deleted", id);
            Ok(())
        }
    }
}

async fn handle_labors_command(
    state: &AppState,
    command: LaborsCommands,
    json: bool,
) -> Result<()> {
    let service = &state.services.labors;
    match command {
        LaborsCommands::Create {
            nursery_id,
            date,
            labor_type,
            description,
        } => {
            let labor = service
                .create_labor(CreateLaborCommand {
                    nursery_id: Some(nursery_id),
                    date: Some(date),
                    description,
                    labor_type: Some(labor_type),
                })
                .await?;
            print_one(&labor, json)
        }
        LaborsCommands::List { nursery_id } => {
            print_many(&service.list_labors_for_nursery(nursery_id).await?, json)
        }
        LaborsCommands::Delete { id } => {
            service.delete_labor(id).await?;
            println!("Labor {} deleted", id);
            Ok(())
        }
        LaborsCommands::AddProduct {
            labor_id,
            product_id,
            quantity,
            date,
        } => {
            let row = service
                .add_product(CreateLaborProductCommand {
                    labor_id: Some(labor_id),
                    product_id: Some(product_id),
                    quantity: Some(quantity),
                    application_date: Some(date),
                })
                .await?;
            if json {
                print_json(&row)
            } else {
                println!("Recorded application {} ({} units)", row.id, row.quantity);
                Ok(())
            }
        }
        LaborsCommands::Products { labor_id } => {
            print_many(&service.list_products_for_labor(labor_id).await?, json)
        }
        LaborsCommands::Applications { product_id } => {
            let rows = service.list_labors_for_product(product_id).await?;
            if json {
                print_json(&rows)
            } else {
                for row in rows {
                    println!(
                        "{}  labor {}  quantity {}",
                        row.application_date, row.labor_id, row.quantity
                    );
                }
                Ok(())
            }
        }
        LaborsCommands::RemoveProduct { id } => {
            service.delete_labor_product(id).await?;
            println!("Labor product {} deleted", id);
            Ok(())
        }
    }
}

async fn handle_summary(state: &AppState, json: bool) -> Result<()> {
    let pool = state.db.as_ref();
    db::check_connection(pool)
        .await
        .context("database is not reachable")?;
    let counts = [
        ("producers", db::count_rows::<entities::Producer>(pool).await?),
        ("farms", db::count_rows::<entities::Farm>(pool).await?),
        ("nurseries", db::count_rows::<entities::Nursery>(pool).await?),
        (
            "control_products",
            db::count_rows::<entities::ControlProduct>(pool).await?,
        ),
        (
            "fungus_controls",
            db::count_rows::<entities::FungusControl>(pool).await?,
        ),
        ("pest_controls", db::count_rows::<entities::PestControl>(pool).await?),
        (
            "fertilizer_controls",
            db::count_rows::<entities::FertilizerControl>(pool).await?,
        ),
        ("labors", db::count_rows::<entities::Labor>(pool).await?),
        (
            "labor_products",
            db::count_rows::<entities::LaborProduct>(pool).await?,
        ),
    ];

    if json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(table, count)| (table.to_string(), serde_json::Value::from(*count)))
            .collect();
        print_json(&map)
    } else {
        for (table, count) in counts {
            println!("{:<20} {}", table, count);
        }
        print!("{}", metrics::render());
        Ok(())
    }
}

fn print_one<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> Result<()> {
    if json {
        print_json(value)
    } else {
        println!("{}", value);
        Ok(())
    }
}

fn print_many<T: Serialize + std::fmt::Display>(values: &[T], json: bool) -> Result<()> {
    if json {
        return print_json(&values);
    }
    if values.is_empty() {
        println!("(none)");
    }
    for value in values {
        println!("{}", value);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
