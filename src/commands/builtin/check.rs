//! `check [version]`: compare the installed framework against published
//! releases.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{error, info};

use super::{BuiltinCommand, CommandContext};
use crate::config;
use crate::releases::{latest, Release, ReleaseClient};

pub struct Check;

impl Check {
    /// The version to compare: the first argument, or the installed one.
    fn current_version(ctx: &CommandContext<'_>) -> anyhow::Result<String> {
        match ctx.args.first() {
            Some(version) => Ok(version.clone()),
            None => config::framework_version(ctx.play_path)
                .context("Cannot determine the installed framework version"),
        }
    }
}

#[async_trait]
impl BuiltinCommand for Check {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()> {
        let current = Release::new(&Self::current_version(ctx)?);
        info!(current = %current, "Checking for newer releases");

        let client = ReleaseClient::new(
            &ctx.settings.tags_url,
            Duration::from_secs(ctx.settings.request_timeout_secs),
        )?;

        let releases = match client.fetch_releases().await {
            Ok(releases) => releases,
            Err(e) => {
                error!("Release check failed: {}", e);
                writeln!(out, "~ Oops,")?;
                writeln!(out, "~ Cannot contact github...")?;
                writeln!(out, "~")?;
                return Err(e.into());
            }
        };

        write_report(&current, &releases, out)?;
        Ok(())
    }
}

/// Print how `current` compares to the newest of `releases`.
pub fn write_report(
    current: &Release,
    releases: &[Release],
    out: &mut (dyn Write + Send),
) -> io::Result<()> {
    match latest(releases) {
        None => writeln!(out, "~ No release found.")?,
        Some(newest) if newest == current => writeln!(out, "~ You are using the latest version.")?,
        Some(newest) => {
            writeln!(out, "~  \tLatest release: {}", newest)?;
            writeln!(out, "~  \tYour version  : {}", current)?;
            writeln!(out, "~")?;
            writeln!(out, "~ Latest release download: {}", newest.url())?;
        }
    }
    writeln!(out, "~")
}
