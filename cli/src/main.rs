mod commands;
mod error;
mod navigator;
mod store;
mod transport;

use std::path::PathBuf;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use session::{CallbackParams, ClusterInput, DEFAULT_API_BASE, Role};

use crate::error::CliError;
use crate::transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "surfer", about = "Surfer session and admin CLI")]
struct Cli {
    #[arg(long, env = "SURFER_BASE_URL", default_value = DEFAULT_API_BASE)]
    base_url: String,

    /// Directory holding the stored credential. Defaults to ~/.config/surfer.
    #[arg(long, env = "SURFER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log session activity to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start Google sign-in and print the provider URL.
    Login,
    /// Finish Google sign-in with the parameters from the callback URL.
    Callback {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        error: Option<String>,
    },
    Whoami,
    Logout,
    Users(UsersCommand),
    Clusters(ClustersCommand),
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Pending,
    Approve { user_id: u64 },
    Reject { user_id: u64 },
    Role { user_id: u64, role: RoleArg },
}

#[derive(Args, Debug)]
struct ClustersCommand {
    #[command(subcommand)]
    command: ClustersSubcommand,
}

#[derive(Subcommand, Debug)]
enum ClustersSubcommand {
    List,
    Get {
        cluster_id: u64,
    },
    /// Register a cluster from a kubeconfig file.
    Add(ClusterArgs),
    /// Change a registered cluster; omitted fields keep their value.
    Update {
        cluster_id: u64,
        #[command(flatten)]
        args: ClusterArgs,
    },
    Delete {
        cluster_id: u64,
    },
    /// Ask the backend to connect to the cluster and report its version.
    Test {
        cluster_id: u64,
    },
    Namespaces {
        cluster_id: u64,
    },
    Pods {
        cluster_id: u64,
        namespace: String,
    },
    Deployments {
        cluster_id: u64,
        namespace: String,
    },
    Services {
        cluster_id: u64,
        namespace: String,
    },
    Logs {
        cluster_id: u64,
        namespace: String,
        pod: String,
        #[arg(long, default_value_t = session::api::DEFAULT_LOG_TAIL)]
        tail: u32,
    },
    DeletePod {
        cluster_id: u64,
        namespace: String,
        pod: String,
    },
}

#[derive(Args, Debug, Default)]
struct ClusterArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Path to the kubeconfig to upload.
    #[arg(long)]
    kubeconfig: Option<PathBuf>,
    #[arg(long, default_value = "")]
    context: String,
}

impl ClusterArgs {
    fn into_input(self) -> Result<ClusterInput, CliError> {
        let kubeconfig = match self.kubeconfig {
            Some(path) => std::fs::read_to_string(&path).map_err(|source| CliError::Kubeconfig { path, source })?,
            None => String::new(),
        };
        Ok(ClusterInput { name: self.name, description: self.description, kubeconfig, context: self.context })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Pending,
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Pending => Self::Pending,
            RoleArg::User => Self::User,
            RoleArg::Admin => Self::Admin,
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = cli.config_dir.unwrap_or_else(store::default_config_dir);
    let transport = Rc::new(ReqwestTransport::new()?);
    let gateway = commands::gateway(&cli.base_url, &config_dir, transport);

    let value = match cli.command {
        Command::Login => commands::login(&gateway).await?,
        Command::Callback { code, state, error } => {
            commands::callback(&gateway, &CallbackParams { code, state, error }).await?
        }
        Command::Whoami => commands::whoami(&gateway).await?,
        Command::Logout => commands::logout(&gateway).await?,
        Command::Users(users) => match users.command {
            UsersSubcommand::List => commands::list_users(&gateway).await?,
            UsersSubcommand::Pending => commands::pending_users(&gateway).await?,
            UsersSubcommand::Approve { user_id } => commands::approve_user(&gateway, user_id).await?,
            UsersSubcommand::Reject { user_id } => commands::reject_user(&gateway, user_id).await?,
            UsersSubcommand::Role { user_id, role } => commands::set_role(&gateway, user_id, role.into()).await?,
        },
        Command::Clusters(clusters) => match clusters.command {
            ClustersSubcommand::List => commands::list_clusters(&gateway).await?,
            ClustersSubcommand::Get { cluster_id } => commands::get_cluster(&gateway, cluster_id).await?,
            ClustersSubcommand::Add(args) => commands::add_cluster(&gateway, &args.into_input()?).await?,
            ClustersSubcommand::Update { cluster_id, args } => {
                commands::update_cluster(&gateway, cluster_id, &args.into_input()?).await?
            }
            ClustersSubcommand::Delete { cluster_id } => commands::delete_cluster(&gateway, cluster_id).await?,
            ClustersSubcommand::Test { cluster_id } => commands::test_cluster(&gateway, cluster_id).await?,
            ClustersSubcommand::Namespaces { cluster_id } => commands::list_namespaces(&gateway, cluster_id).await?,
            ClustersSubcommand::Pods { cluster_id, namespace } => {
                commands::list_pods(&gateway, cluster_id, &namespace).await?
            }
            ClustersSubcommand::Deployments { cluster_id, namespace } => {
                commands::list_deployments(&gateway, cluster_id, &namespace).await?
            }
            ClustersSubcommand::Services { cluster_id, namespace } => {
                commands::list_services(&gateway, cluster_id, &namespace).await?
            }
            ClustersSubcommand::Logs { cluster_id, namespace, pod, tail } => {
                commands::pod_logs(&gateway, cluster_id, &namespace, &pod, tail).await?
            }
            ClustersSubcommand::DeletePod { cluster_id, namespace, pod } => {
                commands::delete_pod(&gateway, cluster_id, &namespace, &pod).await?
            }
        },
    };

    print_json(&value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
