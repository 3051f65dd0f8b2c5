use crate::prelude::*;
use anyhow::anyhow;
use std::{
    env::current_exe,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Loads `variables.env` from beside the executable, writing a template and
/// failing when it is missing. Returns the executable's directory.
pub async fn check_env_vars() -> Result<String> {
    let exe_path = current_exe()?;
    let Some(exe_parent) = exe_path.parent().map(|dir| dir.display().to_string()) else {
        return Err(anyhow!("Could not get parent directory of executable."));
    };

    let env_path = format!("{}/variables.env", exe_parent);
    let env_path = Path::new(&env_path);
    if !env_path.exists() {
        write_template(env_path)?;
        return Err(anyhow!(
            "variables.env not found. Generated template variables.env for user input."
        ));
    }

    dotenv::from_path(env_path).ok();

    Ok(exe_parent)
}

fn write_template(env_path: &Path) -> Result<()> {
    let env_file = File::create(env_path)?;
    let mut env_writer = BufWriter::new(env_file);
    env_writer.write_all(b"SENTRY_DSN=\n")?;
    env_writer.write_all(b"YOUTUBE_API_KEY=myyoutubeapikey\n")?;
    env_writer.write_all(b"WEBHOOK_URL_SHORTS=https://discord.com/api/webhooks/...\n")?;
    env_writer.write_all(b"WEBHOOK_URL_MOVIES=https://discord.com/api/webhooks/...\n")?;
    env_writer.write_all(b"WEBHOOK_URL_LIVES=https://discord.com/api/webhooks/...\n")?;
    env_writer.write_all(b"SHEET_DB_PATH=\n")?;
    env_writer.write_all(b"SHEET_SEED_PATH=\n")?;
    env_writer.write_all(b"POLL_INTERVAL=0\n")?;
    env_writer.flush()?;

    Ok(())
}
