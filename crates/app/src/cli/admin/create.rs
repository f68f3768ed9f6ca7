use clap::Args;
use invites_app::{
    auth::{NewAdminUser, PgAdminsRepository, Role, create_admin},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Admin login email
    #[arg(long)]
    email: String,

    /// Admin password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Role granted to the user (admin or viewer)
    #[arg(long, default_value = "admin")]
    role: Role,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let repository = PgAdminsRepository::new(pool);

    let created = create_admin(
        &repository,
        NewAdminUser {
            email: args.email,
            password: args.password,
            role: args.role,
        },
    )
    .await
    .map_err(|error| format!("failed to create admin user: {error}"))?;

    println!("admin_uuid: {}", created.uuid);
    println!("admin_email: {}", created.email);
    println!("admin_role: {}", created.role);

    Ok(())
}
