use std::io::{self, BufWriter, Write};

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::VerifyArgs;
use crate::commands::{Context, status_line};
use crate::model::VerificationReport;
use crate::util::print_json;

pub fn run(ctx: &Context, args: &VerifyArgs) -> Result<()> {
    let reports = collect_reports(ctx, args.all_domains)?;

    if args.json {
        return match reports.as_slice() {
            [single] if !args.all_domains => print_json(single),
            all => print_json(&all),
        };
    }

    let mut output = BufWriter::new(io::stdout().lock());
    for report in &reports {
        write_report(&mut output, report)?;
    }
    output.flush()?;
    Ok(())
}

/// One report for the active domain, or one per configured domain.
pub fn collect_reports(ctx: &Context, all_domains: bool) -> Result<Vec<VerificationReport>> {
    let domains = if all_domains {
        ctx.config.all_domains()?
    } else {
        vec![ctx.registry.domain().clone()]
    };

    let mut reports = Vec::with_capacity(domains.len());
    for domain in &domains {
        let report = ctx.registry.with_domain(domain.as_str())?.verify();
        log_report(&report);
        reports.push(report);
    }
    Ok(reports)
}

pub(crate) fn log_report(report: &VerificationReport) {
    if report.all_ok {
        info!(
            domain = %report.domain,
            languages = report.languages.len(),
            "all corpus databases ready"
        );
    } else {
        warn!(
            domain = %report.domain,
            ready = report.ready_count(),
            languages = report.languages.len(),
            "some corpus databases are not ready"
        );
    }
}

pub(crate) fn write_report<W: Write>(output: &mut W, report: &VerificationReport) -> Result<()> {
    writeln!(
        output,
        "Verification for domain {}",
        report.domain.as_str().to_ascii_uppercase()
    )?;
    for entry in &report.languages {
        writeln!(output, "  {}", status_line(entry))?;
    }
    writeln!(
        output,
        "Ready: {}/{} (all_ok={})",
        report.ready_count(),
        report.languages.len(),
        report.all_ok
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::RegistryConfig;
    use crate::model::LanguageStatus;

    fn context(root: &std::path::Path) -> Context {
        let mut config = RegistryConfig::default();
        config.base_dir = root.to_path_buf();
        config.domain = "gai".to_string();
        config.domains = vec!["wellness".to_string(), "gai".to_string(), "climate".to_string()];
        config.languages = vec!["eng".to_string()];
        Context::new(config).unwrap()
    }

    #[test]
    fn all_domains_yields_one_report_per_configured_domain() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context(root.path());
        let wellness_db = ctx
            .registry
            .with_domain("wellness")
            .unwrap()
            .resolve()
            .languages[0]
            .database
            .clone();
        fs::create_dir_all(wellness_db.parent().unwrap()).unwrap();
        fs::write(&wellness_db, r#"{"w1": {}}"#).unwrap();

        let reports = collect_reports(&ctx, true).unwrap();

        let domains: Vec<&str> = reports.iter().map(|report| report.domain.as_str()).collect();
        assert_eq!(domains, vec!["gai", "wellness", "climate"]);
        assert!(!reports[0].all_ok);
        assert_eq!(
            reports[1].languages[0].status,
            LanguageStatus::Ok { documents: 1 }
        );
        assert!(!reports[2].all_ok);
    }

    #[test]
    fn active_domain_only_by_default() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context(root.path());

        let reports = collect_reports(&ctx, false).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].domain.as_str(), "gai");
    }
}
