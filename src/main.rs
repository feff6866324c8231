//! Rental Desk CLI
//!
//! Every subcommand is one request to one service, followed by a clean shutdown.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rental_desk::clients::{CustomerClient, ProductClient, RentalClient};
use rental_desk::config::AppConfig;
use rental_desk::lifecycle::{setup_tracing, RentalSystem};
use rental_desk::model::{
    AccountTerms, BookingRequest, CustomerCreate, CustomerId, CustomerUpdate, Product,
    ProductCreate, ProductId, ProductStatus, ProductUpdate, RentalId,
};
use rental_desk::pricing::{format_gbp, RentalPeriod};
use rental_desk::report::{write_history_csv, Receipt, RentalAnalytics};
use resource_actor::EntityClient;
use rust_decimal::Decimal;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rental-desk")]
#[command(about = "Customers, catalog and rental ledger for a small rental business")]
#[command(version)]
struct Cli {
    /// Settings file (default: config/rental-desk.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file, overriding the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    #[command(subcommand)]
    Products(ProductCommand),

    /// Manage customers
    #[command(subcommand)]
    Customers(CustomerCommand),

    /// Book a rental and print its receipt
    Book(BookArgs),

    /// Price a booking without making it
    Quote {
        #[arg(long = "type")]
        product_type: String,
        #[arg(long)]
        period: String,
    },

    /// Browse rental history
    #[command(subcommand)]
    Rentals(RentalCommand),

    /// Write the rental history as CSV ("-" for stdout)
    Export { path: PathBuf },

    /// Revenue and booking counts
    Stats,
}

#[derive(Subcommand)]
enum ProductCommand {
    /// All products, by type and code
    List,
    /// Products that can be booked now
    Eligible {
        #[arg(long = "type")]
        product_type: Option<String>,
    },
    Add {
        product_type: String,
        product_code: String,
        cost_per_day: Decimal,
        quantity: i64,
    },
    /// Replace a product's fields
    Update {
        id: i64,
        #[arg(long = "type")]
        product_type: String,
        #[arg(long = "code")]
        product_code: String,
        #[arg(long = "cost")]
        cost_per_day: Decimal,
        #[arg(long)]
        quantity: i64,
        #[arg(long, default_value = "Available")]
        status: ProductStatus,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum CustomerCommand {
    List,
    Show {
        id: i64,
    },
    Add {
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Change the given fields; an empty value clears a contact field
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Remove a customer with no rentals on file
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum RentalCommand {
    /// Newest first
    List,
    /// Match receipt reference or product type, ignoring case
    Search { term: String },
    /// Print the receipt for a reference
    Show { receipt_ref: String },
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    customer: i64,
    #[arg(long = "type")]
    product_type: String,
    /// One of "1-30 days", "31-90 days", "91-270 days", "271-365 days"
    #[arg(long)]
    period: String,
    #[arg(long)]
    payment: Option<String>,
    #[arg(long)]
    deposit: Option<String>,
    #[arg(long)]
    account_open: Option<String>,
    #[arg(long)]
    application_date: Option<NaiveDate>,
    #[arg(long)]
    next_credit_review: Option<NaiveDate>,
    #[arg(long)]
    last_credit_review: Option<i64>,
    #[arg(long)]
    date_reviewed: Option<NaiveDate>,
    #[arg(long)]
    credit_check: Option<String>,
    #[arg(long)]
    settlement_due_day: Option<i64>,
    #[arg(long)]
    payment_due: Option<String>,
    #[arg(long)]
    pay_due_day: Option<String>,
    #[arg(long)]
    check_credit: bool,
    #[arg(long)]
    terms_agreed: bool,
    #[arg(long)]
    on_hold: bool,
    #[arg(long)]
    restrict_mailing: bool,
}

impl BookArgs {
    fn into_request(self) -> BookingRequest {
        BookingRequest {
            customer_id: CustomerId(self.customer),
            product_type: self.product_type,
            period: self.period,
            terms: AccountTerms {
                account_open: self.account_open,
                application_date: self.application_date,
                next_credit_review: self.next_credit_review,
                last_credit_review: self.last_credit_review,
                date_reviewed: self.date_reviewed,
                credit_check: self.credit_check,
                settlement_due_day: self.settlement_due_day,
                payment_due: self.payment_due,
                deposit: self.deposit,
                pay_due_day: self.pay_due_day,
                payment_method: self.payment,
                check_credit: self.check_credit,
                terms_agreed: self.terms_agreed,
                account_on_hold: self.on_hold,
                restrict_mailing: self.restrict_mailing,
            },
        }
    }
}

type CliResult = Result<(), Box<dyn Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_tracing();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    let system = RentalSystem::start(&config).await?;
    let result = dispatch(&system, cli.command).await;
    system.shutdown().await?;
    result
}

async fn dispatch(system: &RentalSystem, command: Commands) -> CliResult {
    match command {
        Commands::Products(cmd) => products(&system.product_client, cmd).await,
        Commands::Customers(cmd) => customers(&system.customer_client, cmd).await,
        Commands::Book(args) => book(system, args).await,
        Commands::Quote {
            product_type,
            period,
        } => {
            match system.rental_client.quote(&product_type, &period).await? {
                Some(q) => {
                    println!("{} for {} days", product_type, q.day_count);
                    println!("Credit limit: {}", format_gbp(q.credit_limit));
                    println!("Discount:     {}%", q.discount_percent);
                    println!("Subtotal:     {}", format_gbp(q.subtotal));
                    println!("Tax:          {}", format_gbp(q.tax));
                    println!("Total:        {}", format_gbp(q.total));
                }
                None => {
                    let labels: Vec<&str> = RentalPeriod::ALL.iter().map(|p| p.label()).collect();
                    println!("Unknown period '{}'. Choose one of: {}", period, labels.join(", "));
                }
            }
            Ok(())
        }
        Commands::Rentals(cmd) => rentals(system, cmd).await,
        Commands::Export { path } => {
            let history = system.rental_client.list_rentals().await?;
            let written = if path.as_os_str() == "-" {
                write_history_csv(&history, std::io::stdout().lock())?
            } else {
                write_history_csv(&history, std::fs::File::create(&path)?)?
            };
            info!(rows = written, path = %path.display(), "History exported");
            Ok(())
        }
        Commands::Stats => {
            let history = system.rental_client.list_rentals().await?;
            print!("{}", RentalAnalytics::from_rentals(&history));
            Ok(())
        }
    }
}

async fn products(client: &ProductClient, cmd: ProductCommand) -> CliResult {
    match cmd {
        ProductCommand::List => print_products(&client.list_products().await?),
        ProductCommand::Eligible { product_type } => {
            print_products(&client.list_eligible(product_type).await?)
        }
        ProductCommand::Add {
            product_type,
            product_code,
            cost_per_day,
            quantity,
        } => {
            let id = client
                .add_product(ProductCreate {
                    product_type,
                    product_code,
                    cost_per_day,
                    quantity,
                })
                .await?;
            println!("Added {}", id);
        }
        ProductCommand::Update {
            id,
            product_type,
            product_code,
            cost_per_day,
            quantity,
            status,
        } => {
            let product = client
                .update_product(
                    ProductId(id),
                    ProductUpdate {
                        product_type,
                        product_code,
                        cost_per_day,
                        quantity,
                        status,
                    },
                )
                .await?;
            println!("Updated {} ({})", product.id, product.product_code);
        }
        ProductCommand::Delete { id } => {
            client.delete(ProductId(id)).await?;
            println!("Deleted {}", ProductId(id));
        }
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    println!(
        "{:>4}  {:<10} {:<10} {:>10} {:>5}  {}",
        "ID", "Type", "Code", "Per day", "Qty", "Status"
    );
    for p in products {
        println!(
            "{:>4}  {:<10} {:<10} {:>10} {:>5}  {}",
            p.id.0,
            p.product_type,
            p.product_code,
            format_gbp(p.cost_per_day),
            p.available_quantity,
            p.status
        );
    }
}

async fn customers(client: &CustomerClient, cmd: CustomerCommand) -> CliResult {
    match cmd {
        CustomerCommand::List => {
            for c in client.list_customers().await? {
                println!(
                    "{:>4}  {:<24} {:<14} {}",
                    c.id.0,
                    c.name,
                    c.phone.unwrap_or_default(),
                    c.email.unwrap_or_default()
                );
            }
        }
        CustomerCommand::Show { id } => match client.get(CustomerId(id)).await? {
            Some(c) => {
                println!("{} {}", c.id, c.name);
                println!("  phone:   {}", c.phone.unwrap_or_default());
                println!("  email:   {}", c.email.unwrap_or_default());
                println!("  address: {}", c.address.unwrap_or_default());
                println!("  since:   {}", c.created_date);
            }
            None => println!("No customer {}", CustomerId(id)),
        },
        CustomerCommand::Add {
            name,
            phone,
            email,
            address,
        } => {
            let id = client
                .add_customer(CustomerCreate {
                    name,
                    phone,
                    email,
                    address,
                })
                .await?;
            println!("Added {}", id);
        }
        CustomerCommand::Update {
            id,
            name,
            phone,
            email,
            address,
        } => {
            let c = client
                .update_customer(
                    CustomerId(id),
                    CustomerUpdate {
                        name,
                        phone,
                        email,
                        address,
                    },
                )
                .await?;
            println!("Updated {} {}", c.id, c.name);
        }
        CustomerCommand::Delete { id } => {
            client.delete(CustomerId(id)).await?;
            println!("Deleted {}", CustomerId(id));
        }
    }
    Ok(())
}

async fn book(system: &RentalSystem, args: BookArgs) -> CliResult {
    let request = args.into_request();
    let customer = system.customer_client.get(request.customer_id).await?;
    if customer.is_none() {
        // Rentals only declare the reference; booking for an unknown id is allowed.
        info!(customer = %request.customer_id, "Booking for a customer not on file");
    }
    let id: RentalId = system.rental_client.book(request).await?;
    match system.rental_client.get(id).await? {
        Some(rental) => println!("{}", Receipt::new(&rental, customer.as_ref())),
        None => println!("Booked {}", id),
    }
    Ok(())
}

async fn rentals(system: &RentalSystem, cmd: RentalCommand) -> CliResult {
    let client: &RentalClient = &system.rental_client;
    let list = match cmd {
        RentalCommand::List => client.list_rentals().await?,
        RentalCommand::Search { term } => client.search_rentals(&term).await?,
        RentalCommand::Show { receipt_ref } => {
            match client.find_by_receipt(&receipt_ref).await? {
                Some(rental) => {
                    let customer = system.customer_client.get(rental.customer_id).await?;
                    println!("{}", Receipt::new(&rental, customer.as_ref()));
                }
                None => println!("No rental with receipt {}", receipt_ref),
            }
            return Ok(());
        }
    };
    println!(
        "{:<10} {:<19} {:<10} {:<10} {:>5} {:>12}",
        "Receipt", "Created", "Type", "Code", "Days", "Total"
    );
    for r in list {
        println!(
            "{:<10} {:<19} {:<10} {:<10} {:>5} {:>12}",
            r.receipt_ref,
            r.created_at.format("%Y-%m-%d %H:%M:%S"),
            r.product_type,
            r.product_code,
            r.no_days,
            format_gbp(r.total)
        );
    }
    Ok(())
}
