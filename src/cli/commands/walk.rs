//! `rca walk` command - the guided six-step session
//!
//! Runs the workflow controller from the welcome screen to completion. The
//! intake form is prompted field by field with the sample complaint as
//! defaults; every later step waits for a confirmation before moving on.
//! Without a terminal on stdin (or with `--yes`) every default is accepted.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;
use std::time::Duration;

use crate::cli::commands::utils::Session;
use crate::cli::views::{self, progress_indicator, render_stage};
use crate::cli::GlobalOpts;
use crate::core::workflow::{Stage, WorkflowController};
use crate::entities::complaint::{ComplaintForm, FormField};

#[derive(clap::Args, Debug, Default)]
pub struct WalkArgs {
    /// Accept every default without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Skip the pause after the intake form
    #[arg(long)]
    pub no_delay: bool,

    /// Product model on the intake form
    #[arg(long)]
    pub product_model: Option<String>,

    /// Part number on the intake form
    #[arg(long)]
    pub part_number: Option<String>,

    /// Serial number on the intake form
    #[arg(long)]
    pub serial_number: Option<String>,

    /// Defect type on the intake form
    #[arg(long)]
    pub defect_type: Option<String>,

    /// Defect description on the intake form
    #[arg(long)]
    pub description: Option<String>,

    /// Customer on the intake form
    #[arg(long)]
    pub customer: Option<String>,

    /// Report date on the intake form (free text)
    #[arg(long)]
    pub reported_date: Option<String>,
}

impl WalkArgs {
    fn override_for(&self, field: FormField) -> Option<&String> {
        match field {
            FormField::ProductModel => self.product_model.as_ref(),
            FormField::PartNumber => self.part_number.as_ref(),
            FormField::SerialNumber => self.serial_number.as_ref(),
            FormField::DefectType => self.defect_type.as_ref(),
            FormField::Description => self.description.as_ref(),
            FormField::Customer => self.customer.as_ref(),
            FormField::ReportedDate => self.reported_date.as_ref(),
        }
    }

    /// The pre-filled form with command-line overrides applied
    fn seeded_form(&self, defaults: ComplaintForm) -> ComplaintForm {
        let mut form = defaults;
        for field in FormField::ALL {
            if let Some(value) = self.override_for(field) {
                form.set(field, value.clone());
            }
        }
        form
    }
}

/// Prompting front-end; answers every question with its default when not
/// interactive
struct Prompter {
    interactive: bool,
    theme: ColorfulTheme,
}

impl Prompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .into_diagnostic()
    }

    fn fill(&self, mut form: ComplaintForm) -> Result<ComplaintForm> {
        if !self.interactive {
            return Ok(form);
        }
        for field in FormField::ALL {
            let value: String = Input::with_theme(&self.theme)
                .with_prompt(field.label())
                .default(form.get(field).to_string())
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            form.set(field, value);
        }
        Ok(form)
    }
}

pub fn run(args: WalkArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let ds = &session.dataset;
    let opts = &session.opts;

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        session.config.intake_delay()
    };
    let prompter = Prompter {
        interactive: !args.yes && std::io::stdin().is_terminal(),
        theme: ColorfulTheme::default(),
    };
    if !args.yes && !prompter.interactive {
        tracing::info!("stdin is not a terminal; accepting defaults");
    }

    let mut controller = WorkflowController::with_intake_delay(delay);
    loop {
        print!("{}", render_stage(Stage::Welcome, ds, opts));
        println!();
        if !prompter.confirm("Begin analysis?", true)? {
            return Ok(());
        }
        controller.start();

        show_progress(&controller, global);
        print!("{}", views::intake_form(&ComplaintForm::prefilled(&ds.complaint)));
        let form = prompter.fill(args.seeded_form(ComplaintForm::prefilled(&ds.complaint)))?;
        println!();
        print!("{}", views::intake_echo(&form));

        if let Some(ticket) = controller.submit_intake(form) {
            if !ticket.delay().is_zero() {
                std::thread::sleep(ticket.delay());
            }
            controller.resolve(ticket);
        }

        while let Some(step) = controller.stage().step() {
            println!();
            show_progress(&controller, global);
            print!("{}", render_stage(controller.stage(), ds, opts));
            println!();
            if !prompter.confirm(step.next_label(), true)? {
                println!("Stopped at {}.", step.title());
                return Ok(());
            }
            controller.advance();
        }

        println!();
        show_progress(&controller, global);
        print!("{}", render_stage(Stage::Complete, ds, opts));
        println!();

        if !prompter.confirm("Start a new analysis?", false)? {
            break;
        }
        controller.reset();
    }
    Ok(())
}

fn show_progress(controller: &WorkflowController, global: &GlobalOpts) {
    if !global.quiet {
        println!("{}", progress_indicator(&controller.progress()));
    }
}
