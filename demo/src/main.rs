//! Key/value walkthrough against a Vault dev server.
//!
//! Uses a root token to provision a policy, an AppRole role and a KV v2
//! mount, logs in through AppRole, writes and reads a secret, then removes
//! everything it created.

mod settings;
mod tracing_config;

use anyhow::{Context, Result};
use settings::Settings;
use tracing::{info, warn};
use tracing_config::{TracingConfig, init_tracing};
use vault_client::sys::{Auth, Mounts, Policy};
use vault_client::{
    AppRole, AppRoleStrategy, Client, KeyValue, Parameters, Path, TokenStrategy, VaultResult,
};

const ROLE: &str = "example";
const POLICY: &str = "example";
const MOUNT: &str = "demo-kv";
const SECRET: &str = "hello";

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(
        &TracingConfig::default()
            .with_log_level(settings.log_level.as_str())
            .with_json_output(settings.json_logs),
    )?;

    info!(host = %settings.host, port = settings.port, "Starting key/value demo");

    let root = Client::new(
        settings.vault_config()?,
        &TokenStrategy::new(settings.root_token.clone())?,
    )
    .context("could not create root client")?;

    let outcome = setup(&root).and_then(|()| run(&settings, &root));
    cleanup(&root);
    outcome
}

fn setup(root: &Client) -> Result<()> {
    let policy = format!(
        "path \"{MOUNT}/*\" {{capabilities = [\"read\", \"update\", \"list\", \"delete\", \"create\"]}}"
    );
    Policy::new(root)
        .create(&Path::new(POLICY)?, &Parameters::new().with("policy", policy))
        .context("could not create policy")?;
    Auth::new(root)
        .enable(&Path::new("approle")?, &Parameters::from([("type", "approle")]))
        .context("could not enable AppRole")?;
    AppRole::new(root)
        .create(&Path::new(ROLE)?, &Parameters::from([("token_policies", POLICY)]))
        .context("could not create role")?;
    Mounts::new(root)
        .enable(&Path::new(MOUNT)?, &Parameters::from([("type", "kv-v2")]))
        .context("could not enable key/value mount")?;

    info!("Provisioned policy, role and mount");
    Ok(())
}

fn run(settings: &Settings, root: &Client) -> Result<()> {
    let role = Path::new(ROLE)?;
    let approle = AppRole::new(root);
    let role_id = approle.role_id(&role).context("could not get role id")?;
    let secret_id = approle
        .secret_id(&role, &Parameters::new())
        .context("could not generate secret id")?;

    let client = Client::new(
        settings.vault_config()?,
        &AppRoleStrategy::new(role_id, secret_id),
    )
    .context("could not log in with AppRole")?;

    let kv = KeyValue::new(&client).with_mount(Path::new(MOUNT)?);
    let secret = Path::new(SECRET)?;

    kv.create(&secret, &Parameters::from([("foo", "world"), ("baz", "quux")]))
        .context("could not write secret")?;
    kv.update(&secret, &Parameters::from([("foo", "world"), ("baz", "quux2")]))
        .context("could not update secret")?;

    let body = kv.read(&secret).context("could not read secret")?;
    let parsed: serde_json::Value =
        serde_json::from_str(&body).context("secret response is not JSON")?;
    println!("{}", parsed["data"]["data"]);

    kv.del(&secret).context("could not delete secret")?;
    Ok(())
}

fn cleanup(root: &Client) {
    report("delete role", Path::new(ROLE).and_then(|p| AppRole::new(root).del(&p)));
    report(
        "disable AppRole",
        Path::new("approle").and_then(|p| Auth::new(root).disable(&p)),
    );
    report(
        "disable key/value mount",
        Path::new(MOUNT).and_then(|p| Mounts::new(root).disable(&p)),
    );
    report("delete policy", Path::new(POLICY).and_then(|p| Policy::new(root).del(&p)));
}

fn report(step: &str, result: VaultResult<String>) {
    if let Err(e) = result {
        warn!(step, error = %e, "Cleanup step failed");
    }
}
