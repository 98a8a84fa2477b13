use clap::Parser;

use alertsum_app::report_service::DEFAULT_LOOKBACK_DAYS;

/// Email a summary of alerts fired in the monitoring platform.
///
/// The configuration file is read from $ALERTSUM_CONFIG
/// (default: config/alertsum.toml).
#[derive(Debug, Parser)]
#[command(name = "alertsum", version)]
pub struct Cli {
    /// Lookback window in days; fractions are allowed (0.5 = 12 hours).
    #[arg(default_value_t = DEFAULT_LOOKBACK_DAYS, value_parser = parse_days)]
    pub days: f64,
}

fn parse_days(raw: &str) -> Result<f64, String> {
    let days: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !days.is_finite() || days <= 0.0 {
        return Err(format!("lookback must be positive, got {raw}"));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_day() {
        let cli = Cli::try_parse_from(["alertsum"]).unwrap();
        assert_eq!(cli.days, 1.0);
    }

    #[test]
    fn fractional_days_accepted() {
        let cli = Cli::try_parse_from(["alertsum", "0.5"]).unwrap();
        assert_eq!(cli.days, 0.5);
    }

    #[test]
    fn non_positive_or_garbage_rejected() {
        assert!(Cli::try_parse_from(["alertsum", "0"]).is_err());
        assert!(Cli::try_parse_from(["alertsum", "-3"]).is_err());
        assert!(Cli::try_parse_from(["alertsum", "week"]).is_err());
    }

    #[test]
    fn extra_arguments_rejected() {
        assert!(Cli::try_parse_from(["alertsum", "1", "2"]).is_err());
    }
}
