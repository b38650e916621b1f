use super::{AppContext, BookmarkCommand};
use bookmark_parser::error::Result;
use bookmark_parser::validate::{self, HttpProber, ValidateOptions};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[derive(Debug, Clone)]
pub struct ValidateCommand {
    pub nc: bool,
}

fn progress_bar(total: u64, hidden: bool) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if hidden {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{pos}/{len}] {bar:30.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

impl BookmarkCommand for ValidateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let prober = HttpProber::new(ctx.config)?;
        let options = ValidateOptions::from_config(ctx.config);

        println!("Validating bookmarks...");
        let pb = progress_bar(ctx.db.count()? as u64, self.nc);
        let result = validate::validate_bookmarks(ctx.db, &prober, &options, |update| {
            if update.dead {
                pb.set_message(format!("#{} dead", update.id));
            }
            pb.inc(1);
        });
        pb.finish_and_clear();

        let report = result?;
        println!("Validation complete");
        print!("{}", report);
        if let Some(path) = &options.report_path {
            eprintln!("Report written to {}", path.display());
        }
        Ok(())
    }
}
