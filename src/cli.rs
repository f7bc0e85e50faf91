//! Command-line front end.
//!
//! Every subcommand reads a form document from a JSON file, applies one
//! operation and writes the result back (or prints it).

use crate::app::App;
use crate::config::Config;
use crate::form::{
    dangling_dependencies, export_file_name, from_json, select_template, templates,
    to_csv_template, to_json_source, Choices, Condition, ConditionalLogic, FieldDefinition,
    FieldKind, FieldType, FormDocument, FormMetadata, Layout, Size,
};
use crate::logger::LogHandle;
use crate::state::Designer;
use crate::store::{Gateway, HttpStore, ListOutcome, SaveOutcome};
use anyhow::{anyhow, bail, Context, Result};
use clap::{App as ClapApp, AppSettings, Arg, ArgMatches, SubCommand};
use log::*;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Build the argument parser.
///
pub fn build_cli() -> ClapApp<'static, 'static> {
    let file = Arg::with_name("file")
        .help("Form document (JSON)")
        .required(true);

    ClapApp::new("formwright")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Design, preview and save form definitions")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase log verbosity")
                .global(true),
        )
        .subcommand(SubCommand::with_name("templates").about("List the template catalog"))
        .subcommand(
            SubCommand::with_name("new")
                .about("Write a new form document")
                .arg(file.clone())
                .arg(
                    Arg::with_name("template")
                        .long("template")
                        .takes_value(true)
                        .help("Start from a catalog template"),
                )
                .arg(Arg::with_name("name").long("name").takes_value(true))
                .arg(
                    Arg::with_name("description")
                        .long("description")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("layout")
                        .long("layout")
                        .takes_value(true)
                        .help("single-column or two-column"),
                )
                .arg(
                    Arg::with_name("force")
                        .long("force")
                        .help("Overwrite an existing file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("add")
                .about("Append a field")
                .arg(file.clone())
                .arg(
                    Arg::with_name("type")
                        .long("type")
                        .takes_value(true)
                        .required(true)
                        .help("text, textarea, select, multiselect, checkbox, file, date, number or label"),
                )
                .arg(
                    Arg::with_name("label")
                        .long("label")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("required").long("required"))
                .arg(
                    Arg::with_name("placeholder")
                        .long("placeholder")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .takes_value(true)
                        .help("small, medium, large or a width"),
                )
                .arg(
                    Arg::with_name("options")
                        .long("options")
                        .takes_value(true)
                        .help("Comma-separated options for select fields"),
                )
                .arg(
                    Arg::with_name("min")
                        .long("min")
                        .takes_value(true)
                        .help("Minimum length (text) or value (number)"),
                )
                .arg(
                    Arg::with_name("max")
                        .long("max")
                        .takes_value(true)
                        .help("Maximum length (text) or value (number)"),
                )
                .arg(
                    Arg::with_name("validation")
                        .long("validation")
                        .takes_value(true)
                        .help("Regular expression the value must match"),
                )
                .arg(
                    Arg::with_name("depends-on")
                        .long("depends-on")
                        .takes_value(true)
                        .requires_all(&["condition", "value"]),
                )
                .arg(
                    Arg::with_name("condition")
                        .long("condition")
                        .takes_value(true)
                        .requires("depends-on"),
                )
                .arg(
                    Arg::with_name("value")
                        .long("value")
                        .takes_value(true)
                        .requires("depends-on"),
                ),
        )
        .subcommand(
            SubCommand::with_name("update")
                .about("Change settings of existing fields")
                .arg(file.clone())
                .arg(Arg::with_name("ids").multiple(true).required(true))
                .arg(Arg::with_name("label").long("label").takes_value(true))
                .arg(Arg::with_name("name").long("name").takes_value(true))
                .arg(
                    Arg::with_name("required")
                        .long("required")
                        .conflicts_with("optional"),
                )
                .arg(Arg::with_name("optional").long("optional"))
                .arg(
                    Arg::with_name("placeholder")
                        .long("placeholder")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .takes_value(true)
                        .help("small, medium, large or a width"),
                )
                .arg(
                    Arg::with_name("validation")
                        .long("validation")
                        .takes_value(true)
                        .help("Regular expression the value must match"),
                )
                .arg(
                    Arg::with_name("depends-on")
                        .long("depends-on")
                        .takes_value(true)
                        .requires_all(&["condition", "value"])
                        .conflicts_with("always-visible"),
                )
                .arg(
                    Arg::with_name("condition")
                        .long("condition")
                        .takes_value(true)
                        .requires("depends-on"),
                )
                .arg(
                    Arg::with_name("value")
                        .long("value")
                        .takes_value(true)
                        .requires("depends-on"),
                )
                .arg(
                    Arg::with_name("always-visible")
                        .long("always-visible")
                        .help("Drop conditional logic"),
                ),
        )
        .subcommand(
            SubCommand::with_name("remove")
                .about("Remove fields by id")
                .arg(file.clone())
                .arg(Arg::with_name("ids").multiple(true).required(true)),
        )
        .subcommand(
            SubCommand::with_name("move")
                .about("Move fields, as a block, to a position")
                .arg(file.clone())
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("ids").multiple(true).required(true)),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Print the generated JSON source")
                .arg(file.clone()),
        )
        .subcommand(
            SubCommand::with_name("export")
                .about("Write the CSV header template")
                .arg(file.clone())
                .arg(
                    Arg::with_name("out")
                        .long("out")
                        .value_name("DIR")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("save")
                .about("Insert the document into the store")
                .arg(file.clone()),
        )
        .subcommand(SubCommand::with_name("list").about("List saved forms"))
        .subcommand(
            SubCommand::with_name("preview")
                .about("Open the interactive preview")
                .arg(file),
        )
        .subcommand(
            SubCommand::with_name("config")
                .about("Manage the configuration file")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("init")
                        .about("Write a default configuration file")
                        .arg(Arg::with_name("force").long("force")),
                ),
        )
}

/// Log level from `-v` flags, falling back to the configuration.
///
pub fn log_level(matches: &ArgMatches, config: &Config) -> Result<LevelFilter> {
    Ok(match matches.occurrences_of("verbose") {
        0 => config.level_filter()?,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

/// Run the chosen subcommand, writing its output to `out`.
///
pub async fn run(
    matches: &ArgMatches<'_>,
    config: Config,
    log: LogHandle,
    out: &mut dyn Write,
) -> Result<()> {
    match matches.subcommand() {
        ("templates", Some(_)) => {
            for (name, description) in templates() {
                writeln!(out, "{}: {}", name, description)?;
            }
        }
        ("new", Some(args)) => new_document(args, out)?,
        ("add", Some(args)) => add_field(args, out)?,
        ("update", Some(args)) => update_fields(args, out)?,
        ("remove", Some(args)) => {
            let path = file_arg(args)?;
            let mut doc = read_document(path)?;
            let ids: Vec<&str> = args.values_of("ids").map(|v| v.collect()).unwrap_or_default();
            let removed = doc.remove_fields(&ids);
            warn_dangling(&doc);
            write_document(path, &doc)?;
            writeln!(out, "Removed {} field(s)", removed)?;
        }
        ("move", Some(args)) => {
            let path = file_arg(args)?;
            let mut doc = read_document(path)?;
            let to = args.value_of("to").unwrap_or_default();
            let target: usize = to
                .parse()
                .with_context(|| format!("Invalid position '{}'", to))?;
            let ids: Vec<&str> = args.values_of("ids").map(|v| v.collect()).unwrap_or_default();
            if doc.move_fields(&ids, target) {
                write_document(path, &doc)?;
            }
            writeln!(out, "{}", doc.ids().join(", "))?;
        }
        ("show", Some(args)) => {
            let doc = read_document(file_arg(args)?)?;
            writeln!(out, "{}", to_json_source(&doc)?)?;
        }
        ("export", Some(args)) => {
            let doc = read_document(file_arg(args)?)?;
            let dir = args
                .value_of("out")
                .map(Path::new)
                .unwrap_or(config.export_dir.as_path());
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let target = export_target(dir, &doc.metadata);
            fs::write(&target, to_csv_template(&doc))
                .with_context(|| format!("Failed to write {}", target.display()))?;
            info!("Exported CSV template to {}", target.display());
            writeln!(out, "{}", target.display())?;
        }
        ("save", Some(args)) => {
            let doc = read_document(file_arg(args)?)?;
            let gateway = Gateway::new(HttpStore::new(&config.store)?);
            match gateway.save(&doc).await {
                SaveOutcome::Saved { id } => writeln!(out, "Saved as {}", id)?,
                SaveOutcome::Failed { error } => bail!("Save failed: {}", error),
            }
        }
        ("list", Some(_)) => {
            let gateway = Gateway::new(HttpStore::new(&config.store)?);
            match gateway.list_all().await {
                ListOutcome::Listed { forms } => {
                    for form in forms {
                        writeln!(
                            out,
                            "{}\t{}\t{}",
                            form.id,
                            form.document.metadata.name,
                            form.saved_at.unwrap_or_default()
                        )?;
                    }
                }
                ListOutcome::Failed { error } => bail!("Listing failed: {}", error),
            }
        }
        ("preview", Some(args)) => {
            let doc = read_document(file_arg(args)?)?;
            warn_dangling(&doc);
            App::start(config, doc, log).await?;
        }
        ("config", Some(args)) => {
            if let ("init", Some(init)) = args.subcommand() {
                let path = config
                    .file_path()
                    .ok_or_else(|| anyhow!("Configuration path unknown"))?
                    .to_path_buf();
                if path.exists() && !init.is_present("force") {
                    bail!("{} already exists (use --force to overwrite)", path.display());
                }
                config.save()?;
                writeln!(out, "{}", path.display())?;
            }
        }
        (other, _) => bail!("Unknown command '{}'", other),
    }
    Ok(())
}

/// Read a form document from a JSON file.
///
pub fn read_document(path: &Path) -> Result<FormDocument> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    from_json(&source).with_context(|| format!("Invalid form document {}", path.display()))
}

/// Write a form document as pretty JSON.
///
pub fn write_document(path: &Path, doc: &FormDocument) -> Result<()> {
    let mut source = to_json_source(doc)?;
    source.push('\n');
    fs::write(path, source).with_context(|| format!("Failed to write {}", path.display()))
}

fn file_arg<'a>(args: &'a ArgMatches) -> Result<&'a Path> {
    args.value_of("file")
        .map(Path::new)
        .ok_or_else(|| anyhow!("Missing form document path"))
}

fn new_document(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let path = file_arg(args)?;
    if path.exists() && !args.is_present("force") {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut doc = match args.value_of("template") {
        Some(name) => select_template(name)?,
        None => FormDocument::new(),
    };
    let mut metadata = doc.metadata.clone();
    if let Some(name) = args.value_of("name") {
        metadata.name = name.to_string();
    }
    if let Some(description) = args.value_of("description") {
        metadata.description = description.to_string();
    }
    if let Some(layout) = args.value_of("layout") {
        metadata.layout = layout.parse::<Layout>().map_err(|e| anyhow!(e))?;
    }
    doc.set_metadata(metadata);

    write_document(path, &doc)?;
    writeln!(out, "Created {} with {} field(s)", path.display(), doc.len())?;
    Ok(())
}

fn add_field(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let path = file_arg(args)?;
    let mut doc = read_document(path)?;

    let field_type: FieldType = args
        .value_of("type")
        .unwrap_or_default()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let mut field = FieldDefinition::new(field_type, args.value_of("label").unwrap_or_default());
    field.required = args.is_present("required");
    field.placeholder = args.value_of("placeholder").map(str::to_string);
    field.validation = args.value_of("validation").map(str::to_string);
    if let Some(size) = args.value_of("size") {
        field.size = size.parse::<Size>().map_err(|e| anyhow!(e))?;
    }
    apply_limits(&mut field.kind, args.value_of("min"), args.value_of("max"))?;
    if let Some(options) = args.value_of("options") {
        let choices = Choices::new(
            options
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty()),
        );
        field.kind = match field.kind {
            FieldKind::Select(_) => FieldKind::Select(choices),
            FieldKind::Multiselect(_) => FieldKind::Multiselect(choices),
            _ => bail!("--options only applies to select and multiselect fields"),
        };
    }
    if let Some(depends_on) = args.value_of("depends-on") {
        let condition: Condition = args
            .value_of("condition")
            .unwrap_or_default()
            .parse()
            .map_err(|e: String| anyhow!(e))?;
        field.conditional_logic = Some(ConditionalLogic::new(
            depends_on,
            condition,
            args.value_of("value").unwrap_or_default(),
        ));
    }

    let id = field.id.clone();
    doc.add_field(field)?;
    warn_dangling(&doc);
    write_document(path, &doc)?;
    writeln!(out, "{}", id)?;
    Ok(())
}

/// Apply the given settings to every listed field. Ids missing from the
/// document are skipped.
///
fn update_fields(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let path = file_arg(args)?;
    let mut designer = Designer::new(read_document(path)?, None);
    for id in args.values_of("ids").into_iter().flatten() {
        designer.toggle_selection(id, true);
    }

    let size = args
        .value_of("size")
        .map(|s| s.parse::<Size>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let logic = match args.value_of("depends-on") {
        Some(depends_on) => {
            let condition: Condition = args
                .value_of("condition")
                .unwrap_or_default()
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            Some(ConditionalLogic::new(
                depends_on,
                condition,
                args.value_of("value").unwrap_or_default(),
            ))
        }
        None => None,
    };

    let updates: Vec<FieldDefinition> = designer
        .selected_fields()
        .into_iter()
        .map(|field| {
            let mut field = field.clone();
            if let Some(label) = args.value_of("label") {
                field.label = label.to_string();
            }
            if let Some(name) = args.value_of("name") {
                field.name = name.to_string();
            }
            if args.is_present("required") {
                field.required = true;
            } else if args.is_present("optional") {
                field.required = false;
            }
            if let Some(placeholder) = args.value_of("placeholder") {
                field.placeholder = Some(placeholder.to_string()).filter(|p| !p.is_empty());
            }
            if let Some(size) = size {
                field.size = size;
            }
            if let Some(validation) = args.value_of("validation") {
                field.validation = Some(validation.to_string()).filter(|v| !v.is_empty());
            }
            if logic.is_some() {
                field.conditional_logic = logic.clone();
            } else if args.is_present("always-visible") {
                field.conditional_logic = None;
            }
            field
        })
        .collect();

    let updated = designer.update_fields(&updates);
    warn_dangling(designer.document());
    if updated > 0 {
        write_document(path, designer.document())?;
    }
    writeln!(out, "Updated {} field(s)", updated)?;
    Ok(())
}

/// Path of the CSV template inside `dir`. Path separators and leading dots
/// in the form name are replaced so the file stays inside `dir`.
///
fn export_target(dir: &Path, metadata: &FormMetadata) -> PathBuf {
    let name = export_file_name(metadata).replace(['/', '\\'], "_");
    let dots = name.len() - name.trim_start_matches('.').len();
    dir.join(format!("{}{}", "_".repeat(dots), &name[dots..]))
}

fn apply_limits(kind: &mut FieldKind, min: Option<&str>, max: Option<&str>) -> Result<()> {
    if min.is_none() && max.is_none() {
        return Ok(());
    }
    match kind {
        FieldKind::Text(rules) | FieldKind::Textarea(rules) => {
            rules.min_length = min.map(str::parse).transpose().context("Invalid --min")?;
            rules.max_length = max.map(str::parse).transpose().context("Invalid --max")?;
        }
        FieldKind::Number(range) => {
            range.min = min.map(str::parse).transpose().context("Invalid --min")?;
            range.max = max.map(str::parse).transpose().context("Invalid --max")?;
        }
        _ => bail!("--min/--max only apply to text, textarea and number fields"),
    }
    Ok(())
}

fn warn_dangling(doc: &FormDocument) {
    for (field_id, depends_on) in dangling_dependencies(doc) {
        warn!(
            "Field '{}' depends on missing field '{}' and stays hidden",
            field_id, depends_on
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::CustomLogger;
    use httpmock::MockServer;
    use serde_json::json;
    use std::env;
    use std::path::PathBuf;
    use uuid::Uuid;

    struct Workspace {
        dir: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = env::temp_dir().join(format!("formwright-cli-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Workspace { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.join(name).to_string_lossy().to_string()
        }
    }

    impl Drop for Workspace {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    async fn exec(args: &[&str], config: Config) -> Result<String> {
        let mut argv = vec!["formwright"];
        argv.extend_from_slice(args);
        let matches = build_cli().get_matches_from_safe(argv)?;
        let mut out = Vec::new();
        let log = CustomLogger::new(LevelFilter::Off).handle();
        run(&matches, config, log, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn test_templates() {
        let output = exec(&["templates"], Config::new()).await.unwrap();
        assert!(output.contains("Contact Form: A simple contact form"));
        assert!(output.contains("Event Registration:"));
    }

    #[tokio::test]
    async fn test_new_add_move_remove() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();

        exec(&["new", file, "--name", "Signup", "--layout", "two-column"], Config::new())
            .await
            .unwrap();
        assert!(exec(&["new", file], Config::new()).await.is_err());

        let email = exec(
            &["add", file, "--type", "text", "--label", "Email", "--required"],
            Config::new(),
        )
        .await
        .unwrap();
        let plan = exec(
            &[
                "add", file, "--type", "select", "--label", "Plan", "--options", "Free, Pro",
            ],
            Config::new(),
        )
        .await
        .unwrap();
        let (email, plan) = (email.trim(), plan.trim());

        let order = exec(&["move", file, "--to", "0", plan], Config::new())
            .await
            .unwrap();
        assert_eq!(order.trim(), format!("{}, {}", plan, email));

        let doc = read_document(Path::new(file)).unwrap();
        assert_eq!(doc.metadata.name, "Signup");
        assert_eq!(doc.metadata.layout, Layout::TwoColumn);
        assert_eq!(doc.field(plan).unwrap().kind.options(), ["Free", "Pro"]);
        assert!(doc.field(email).unwrap().required);

        let output = exec(&["remove", file, email, "ghost"], Config::new())
            .await
            .unwrap();
        assert_eq!(output.trim(), "Removed 1 field(s)");
        assert_eq!(read_document(Path::new(file)).unwrap().ids(), vec![plan]);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_arguments() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file], Config::new()).await.unwrap();

        assert!(exec(&["add", file, "--type", "slider", "--label", "X"], Config::new())
            .await
            .is_err());
        assert!(exec(
            &["add", file, "--type", "text", "--label", "X", "--options", "a,b"],
            Config::new()
        )
        .await
        .is_err());
        assert!(exec(
            &["add", file, "--type", "date", "--label", "X", "--min", "1"],
            Config::new()
        )
        .await
        .is_err());
        assert!(read_document(Path::new(file)).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_conditional_number_field() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--template", "Contact Form"], Config::new())
            .await
            .unwrap();

        let id = exec(
            &[
                "add", file, "--type", "number", "--label", "Age", "--min", "18", "--max", "99",
                "--depends-on", "email", "--condition", "notEquals", "--value", "",
            ],
            Config::new(),
        )
        .await
        .unwrap();

        let doc = read_document(Path::new(file)).unwrap();
        let field = doc.field(id.trim()).unwrap();
        assert_eq!(field.kind.number_range().unwrap().min, Some(18.0));
        let logic = field.conditional_logic.as_ref().unwrap();
        assert_eq!(logic.depends_on, "email");
        assert_eq!(logic.condition, Condition::NotEquals);
    }

    #[tokio::test]
    async fn test_show_and_export() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--template", "Contact Form"], Config::new())
            .await
            .unwrap();

        let source = exec(&["show", file], Config::new()).await.unwrap();
        assert!(source.contains("\"metadata\""));
        assert!(source.contains("\"name\": \"Contact Us\""));

        let mut config = Config::new();
        config.export_dir = ws.dir.join("exports");
        let target = exec(&["export", file], config).await.unwrap();
        assert!(target.trim().ends_with("Contact_Us_template.csv"));
        let csv = fs::read_to_string(target.trim()).unwrap();
        assert_eq!(
            csv,
            "Form Name: Contact Us\nForm Description: Get in touch with us\n\nName,Email,Message\n"
        );
    }

    #[tokio::test]
    async fn test_export_stays_inside_directory() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--name", "../escaped"], Config::new())
            .await
            .unwrap();

        let exports = ws.dir.join("exports");
        let mut config = Config::new();
        config.export_dir = exports.clone();
        let target = exec(&["export", file], config).await.unwrap();
        let target = PathBuf::from(target.trim());

        assert_eq!(target.parent(), Some(exports.as_path()));
        assert_eq!(
            target.file_name().unwrap().to_string_lossy(),
            "___escaped_template.csv"
        );
        assert!(target.exists());
        assert!(!ws.dir.join("escaped_template.csv").exists());
    }

    #[tokio::test]
    async fn test_update_fields() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--template", "Contact Form"], Config::new())
            .await
            .unwrap();

        let output = exec(
            &[
                "update", file, "email", "message", "ghost", "--optional", "--size", "small",
                "--placeholder", "", "--depends-on", "name", "--condition", "not-equals",
                "--value", "",
            ],
            Config::new(),
        )
        .await
        .unwrap();
        assert_eq!(output.trim(), "Updated 2 field(s)");

        let doc = read_document(Path::new(file)).unwrap();
        assert_eq!(doc.ids(), vec!["name", "email", "message"]);
        for id in ["email", "message"] {
            let field = doc.field(id).unwrap();
            assert!(!field.required);
            assert_eq!(field.size, Size::Small);
            assert_eq!(field.placeholder, None);
            let logic = field.conditional_logic.as_ref().unwrap();
            assert_eq!(logic.depends_on, "name");
            assert_eq!(logic.condition, Condition::NotEquals);
        }
        let name = doc.field("name").unwrap();
        assert!(name.required);
        assert_eq!(name.placeholder.as_deref(), Some("Enter your name"));

        exec(
            &["update", file, "email", "--label", "Work Email", "--name", "work_email", "--always-visible"],
            Config::new(),
        )
        .await
        .unwrap();
        let doc = read_document(Path::new(file)).unwrap();
        let email = doc.field("email").unwrap();
        assert_eq!(email.label, "Work Email");
        assert_eq!(email.name, "work_email");
        assert!(email.conditional_logic.is_none());
        assert!(doc.field("message").unwrap().conditional_logic.is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_bad_arguments() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--template", "Contact Form"], Config::new())
            .await
            .unwrap();
        let before = fs::read_to_string(file).unwrap();

        assert!(exec(&["update", file, "name", "--required", "--optional"], Config::new())
            .await
            .is_err());
        assert!(exec(&["update", file, "name", "--size", "huge"], Config::new())
            .await
            .is_err());
        let output = exec(&["update", file, "ghost", "--required"], Config::new())
            .await
            .unwrap();
        assert_eq!(output.trim(), "Updated 0 field(s)");
        assert_eq!(fs::read_to_string(file).unwrap(), before);
    }

    #[tokio::test]
    async fn test_save_and_list_against_store() {
        let server = MockServer::start();
        let insert = server.mock(|when, then| {
            when.method("POST").path("/action/insertOne");
            then.status(201).json_body(json!({ "insertedId": "65f0c0ffee" }));
        });
        let find = server.mock(|when, then| {
            when.method("POST").path("/action/find");
            then.status(200).json_body(json!({
                "documents": [{
                    "_id": { "$oid": "65f0c0ffee" },
                    "savedAt": "2024-05-01T10:00:00+00:00",
                    "metadata": { "name": "Contact Us" },
                    "elements": []
                }]
            }));
        });

        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file, "--template", "Contact Form"], Config::new())
            .await
            .unwrap();

        let mut config = Config::new();
        config.store.base_url = Some(server.base_url());
        config.store.api_key = Some("secret".to_string());

        let saved = exec(&["save", file], config.clone()).await.unwrap();
        assert_eq!(saved.trim(), "Saved as 65f0c0ffee");
        let listed = exec(&["list"], config).await.unwrap();
        assert_eq!(
            listed.trim(),
            "65f0c0ffee\tContact Us\t2024-05-01T10:00:00+00:00"
        );
        insert.assert();
        find.assert();
    }

    #[tokio::test]
    async fn test_save_requires_store() {
        let ws = Workspace::new();
        let file = ws.path("form.json");
        let file = file.as_str();
        exec(&["new", file], Config::new()).await.unwrap();
        assert!(exec(&["save", file], Config::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_config_init() {
        let ws = Workspace::new();
        let dir = ws.path("conf");
        let mut config = Config::new();
        config.load(Some(dir.as_str())).unwrap();

        let output = exec(&["config", "init"], config.clone()).await.unwrap();
        assert!(output.trim().ends_with("config.yml"));
        assert!(exec(&["config", "init"], config.clone()).await.is_err());
        assert!(exec(&["config", "init", "--force"], config).await.is_ok());
    }

    #[tokio::test]
    async fn test_config_init_leaves_out_environment_credentials() {
        let ws = Workspace::new();
        let dir = ws.path("conf");
        let mut config = Config::new();
        config.load(Some(dir.as_str())).unwrap();
        config.apply_overrides(
            Some("https://data.example.com".to_string()),
            Some("SECRET-FROM-ENV".to_string()),
        );

        let output = exec(&["config", "init"], config).await.unwrap();
        let written = fs::read_to_string(output.trim()).unwrap();
        assert!(!written.contains("SECRET-FROM-ENV"));
        assert!(!written.contains("data.example.com"));

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.as_str())).unwrap();
        assert_eq!(reloaded.store.api_key, None);
    }

    #[test]
    fn test_log_level_flags() {
        let config = Config::new();
        let matches = build_cli()
            .get_matches_from_safe(vec!["formwright", "-vv", "templates"])
            .unwrap();
        assert_eq!(log_level(&matches, &config).unwrap(), LevelFilter::Trace);
        let matches = build_cli()
            .get_matches_from_safe(vec!["formwright", "templates"])
            .unwrap();
        assert_eq!(log_level(&matches, &config).unwrap(), LevelFilter::Info);
    }
}
