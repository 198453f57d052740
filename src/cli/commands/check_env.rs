//! `check-env`: build environment verification loop.

use crate::{
    bundler::SystemRunner,
    cli::RuntimeConfig,
    environment::{CheckOutcome, EnvironmentChecker, Requirements},
    error::{EXIT_SUCCESS, Result},
};

/// Runs the checks until they pass, the user declines installation or an
/// unresolvable issue remains.
///
/// Fatal architecture or distribution mismatches are returned as errors.
pub async fn check_environment(config: &RuntimeConfig, assume_yes: bool) -> Result<i32> {
    config.output().section("NAP build environment")?;
    let checker = EnvironmentChecker::new(&SystemRunner, config.output(), Requirements::default())
        .assume_yes(assume_yes);

    let outcome = if assume_yes {
        checker.run(&mut |_: &str| true).await?
    } else {
        checker.run(&mut prompt_yes_no).await?
    };

    log::debug!("Environment check finished: {:?}", outcome);
    if outcome == CheckOutcome::Ready {
        config.verbose_println("All checks passed")?;
    }
    Ok(EXIT_SUCCESS)
}

/// Interactive `[Y/n]` prompt. Anything but an explicit answer, including a
/// closed or non-interactive terminal, counts as "no".
fn prompt_yes_no(question: &str) -> bool {
    match dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
    {
        Ok(answer) => answer,
        Err(e) => {
            log::warn!("Could not read an answer: {}", e);
            false
        }
    }
}
