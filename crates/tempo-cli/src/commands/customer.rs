use serde::Serialize;
use serde_json::json;
use tempo_core::entities::{Customer, Project};
use tempo_db::updates::customer::CustomerUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CustomerCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CustomerDetailResponse {
    customer: Customer,
    projects: Vec<Project>,
}

/// Handle `tempo customer`.
pub async fn handle(
    action: &CustomerCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CustomerCommands::Create { name } => {
            let customer = ctx.service.create_customer(name).await?;
            output(&customer, flags.format)
        }
        CustomerCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let customers = ctx.service.list_customers(limit).await?;
            output(&customers, flags.format)
        }
        CustomerCommands::Get { customer } => {
            let customer = resolve::customer(ctx, customer).await?;
            let projects = ctx
                .service
                .list_projects(false, u32::MAX)
                .await?
                .into_iter()
                .filter(|project| project.customer_id == customer.id)
                .collect();
            output(&CustomerDetailResponse { customer, projects }, flags.format)
        }
        CustomerCommands::Update {
            customer,
            name,
            active,
        } => {
            if name.is_none() && active.is_none() {
                anyhow::bail!("At least one of --name or --active must be provided");
            }
            let customer = resolve::customer(ctx, customer).await?;
            let mut builder = CustomerUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(active) = active {
                builder = builder.active(*active);
            }
            let updated = ctx
                .service
                .update_customer(&customer.id, builder.build())
                .await?;
            output(&updated, flags.format)
        }
        CustomerCommands::Delete { customer } => {
            let customer = resolve::customer(ctx, customer).await?;
            ctx.service.delete_customer(&customer.id).await?;
            output(
                &json!({ "customer": customer.id, "name": customer.name, "deleted": true }),
                flags.format,
            )
        }
    }
}
