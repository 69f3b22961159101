//! Clap adapter for claphcl.
//!
//! This module is the **optional integration layer** between the
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`FlagModel::from_command`] walks a [`Command`] tree and describes every
//! long flag to the core. [`HclResolver::apply`] then injects resolved values
//! as clap default values, so anything given on the command line still wins:
//!
//! ```ignore
//! let resolver = HclConfig::builder().file("~/.app.hcl").load()?;
//! let matches = resolver.apply(Cli::command())?.get_matches();
//! let cli = Cli::from_arg_matches(&matches)?;
//! ```
//!
//! Mapping rules:
//!
//! - only arguments with a long name are flags; positionals, short-only
//!   arguments and help/version flags are skipped;
//! - the subcommand chain below the root forms the command segments;
//! - an argument's help heading is its group, lowercased with whitespace
//!   replaced by `-`;
//! - literal prefixes and raw flags come from the builder's hints.

use clap::{Arg, ArgAction, Command};
use tracing::debug;

use crate::error::HclError;
use crate::resolver::HclResolver;
use crate::schema::{FlagHints, FlagModel, FlagSpec};
use crate::tree::Node;
use crate::value::Value;

impl FlagModel {
    /// Describe every long flag of `cmd` and its subcommands.
    pub fn from_command(cmd: &Command, hints: &FlagHints) -> FlagModel {
        let mut model = FlagModel::new();
        collect_flags(cmd, &mut Vec::new(), hints, &mut model);
        model
    }
}

impl HclResolver {
    /// Check every configuration key against the flags of `cmd`.
    pub fn validate_command(&self, cmd: &Command) -> Result<(), HclError> {
        self.validate(&FlagModel::from_command(cmd, self.hints()))
    }

    /// Inject configured values into `cmd` as default values.
    ///
    /// In strict mode the configuration is validated against `cmd` first.
    pub fn apply(&self, mut cmd: Command) -> Result<Command, HclError> {
        let model = FlagModel::from_command(&cmd, self.hints());
        if self.is_strict() {
            self.validate(&model)?;
        }

        for flag in model.flags() {
            let Some(default) = self.config_default(flag) else {
                continue;
            };
            debug!(flag = %flag.key(), arg = %flag.id, "injecting configured default");
            cmd = inject(cmd, &flag.commands, &flag.id, default);
        }
        Ok(cmd)
    }

    fn config_default(&self, flag: &FlagSpec) -> Option<ConfigDefault> {
        let path = flag.path();
        match self.resolve(&path)? {
            Node::Value(Value::Array(items)) if !flag.raw => Some(ConfigDefault::List(
                items.iter().map(Value::render).collect(),
            )),
            _ => self.resolve_default(&path).map(ConfigDefault::Single),
        }
    }
}

enum ConfigDefault {
    Single(String),
    List(Vec<String>),
}

impl ConfigDefault {
    /// A configured value satisfies a required flag, so the arg stops being
    /// required once it has one.
    fn set(self, arg: Arg) -> Arg {
        let arg = arg.required(false);
        match self {
            ConfigDefault::List(items) if takes_many(&arg) => arg.default_values(items),
            ConfigDefault::List(items) => arg.default_value(items.join(",")),
            ConfigDefault::Single(value) => arg.default_value(value),
        }
    }
}

fn takes_many(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg.get_num_args().is_some_and(|range| range.max_values() > 1)
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(
        arg.get_action(),
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

/// Turn a help heading into a key segment: `Network Options` → `network-options`.
pub(crate) fn group_name(heading: &str) -> String {
    heading
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn collect_flags(
    cmd: &Command,
    chain: &mut Vec<String>,
    hints: &FlagHints,
    model: &mut FlagModel,
) {
    for arg in cmd.get_arguments() {
        let Some(long) = arg.get_long() else {
            continue;
        };
        if is_builtin(arg) {
            continue;
        }
        let id = arg.get_id().as_str();
        let mut flag = FlagSpec::new(long).id(id).commands(chain.iter().cloned());
        if let Some(heading) = arg.get_help_heading() {
            flag = flag.group(&group_name(heading));
        }
        if let Some(prefix) = hints.prefix_for(id, long) {
            flag = flag.prefix(prefix);
        }
        if hints.is_raw(id, long) {
            flag = flag.raw();
        }
        model.push(flag);
    }

    for sub in cmd.get_subcommands() {
        chain.push(sub.get_name().to_string());
        collect_flags(sub, chain, hints, model);
        chain.pop();
    }
}

fn inject(cmd: Command, commands: &[String], id: &str, default: ConfigDefault) -> Command {
    match commands.split_first() {
        None => cmd.mut_arg(id, |arg| default.set(arg)),
        Some((name, rest)) => cmd.mut_subcommand(name, |sub| inject(sub, rest, id, default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::HclConfig;
    use crate::fixtures::test::{
        FRAGMENT_BODY, FRAGMENT_CONFIG, Frag, REFERENCE_CONFIG, expected_frag,
    };
    use crate::raw::RawConfig;
    use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Args)]
    struct Embedded {
        #[arg(long, help_heading = "group")]
        embedded_flag: Option<String>,
    }

    #[derive(Debug, Subcommand)]
    enum Commands {
        Command {
            #[arg(long)]
            command_flag: Option<String>,
        },
    }

    #[derive(Debug, Parser)]
    #[command(name = "app")]
    struct Cli {
        #[arg(long)]
        flag_name: Option<String>,
        #[arg(long)]
        int_flag: Option<i32>,
        #[arg(long)]
        float_flag: Option<f64>,
        #[arg(long)]
        slice_flag: Vec<i32>,
        #[arg(long, help_heading = "group")]
        grouped_flag: Option<String>,
        #[arg(long)]
        prefixed_flag: Option<String>,
        #[command(flatten)]
        embedded: Embedded,
        #[command(subcommand)]
        command: Option<Commands>,
    }

    #[derive(Debug, Parser)]
    #[command(name = "app")]
    struct FragmentCli {
        #[arg(long)]
        flag: Option<String>,
        #[arg(long)]
        fragment: Option<RawConfig>,
    }

    fn resolver(input: &str) -> HclResolver {
        HclConfig::builder()
            .source(input)
            .prefix("prefixed_flag", "prefix-")
            .raw_flag("fragment")
            .load()
            .unwrap()
    }

    fn parse<P: Parser>(resolver: &HclResolver, args: &[&str]) -> P {
        let cmd = resolver.apply(P::command()).unwrap();
        let matches = cmd.try_get_matches_from(args).unwrap();
        P::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn model_from_derive() {
        let r = resolver("");
        let model = FlagModel::from_command(&Cli::command(), r.hints());
        let keys: Vec<String> = model.flags().iter().map(FlagSpec::key).collect();
        assert_eq!(
            keys,
            [
                "flag-name",
                "int-flag",
                "float-flag",
                "slice-flag",
                "group-grouped-flag",
                "prefix-prefixed-flag",
                "group-embedded-flag",
                "command-command-flag",
            ]
        );
    }

    #[test]
    fn arg_ids_are_kept() {
        let model = FlagModel::from_command(&Cli::command(), &FlagHints::default());
        let flag = &model.flags()[0];
        assert_eq!(flag.id, "flag_name");
        assert_eq!(flag.name, "flag-name");
    }

    #[test]
    fn positionals_and_short_only_args_are_skipped() {
        let cmd = Command::new("app")
            .arg(Arg::new("input"))
            .arg(Arg::new("quiet").short('q').action(ArgAction::SetTrue))
            .arg(Arg::new("level").long("level"));
        let model = FlagModel::from_command(&cmd, &FlagHints::default());
        assert_eq!(model.flags().len(), 1);
        assert_eq!(model.flags()[0].name, "level");
    }

    #[test]
    fn builtin_flags_are_skipped() {
        let mut cmd = Command::new("app")
            .version("1.0")
            .arg(Arg::new("level").long("level"));
        cmd.build();
        let model = FlagModel::from_command(&cmd, &FlagHints::default());
        let names: Vec<&str> = model.flags().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["level"]);
    }

    #[test]
    fn headings_become_group_segments() {
        assert_eq!(group_name("group"), "group");
        assert_eq!(group_name("Network  Options"), "network-options");
    }

    #[test]
    fn applies_reference_config() {
        let cli: Cli = parse(&resolver(REFERENCE_CONFIG), &["app"]);
        assert_eq!(cli.flag_name.as_deref(), Some("hello world"));
        assert_eq!(cli.int_flag, Some(10));
        assert_eq!(cli.float_flag, Some(10.5));
        assert_eq!(cli.slice_flag, [1, 2, 3]);
        assert_eq!(cli.grouped_flag.as_deref(), Some("grouped flag"));
        assert_eq!(cli.prefixed_flag.as_deref(), Some("prefixed flag"));
        assert_eq!(cli.embedded.embedded_flag.as_deref(), Some("embedded flag"));
    }

    #[test]
    fn subcommand_flags_get_defaults() {
        let cli: Cli = parse(&resolver(REFERENCE_CONFIG), &["app", "command"]);
        match cli.command {
            Some(Commands::Command { command_flag }) => {
                assert_eq!(command_flag.as_deref(), Some("command flag"))
            }
            other => panic!("Expected Command, got: {other:?}"),
        }
    }

    #[test]
    fn command_line_overrides_config() {
        let cli: Cli = parse(
            &resolver(REFERENCE_CONFIG),
            &["app", "--int-flag", "42", "--slice-flag", "7"],
        );
        assert_eq!(cli.int_flag, Some(42));
        assert_eq!(cli.slice_flag, [7]);
        assert_eq!(cli.flag_name.as_deref(), Some("hello world"));
    }

    #[test]
    fn empty_config_leaves_flags_unset() {
        let cli: Cli = parse(&resolver(""), &["app"]);
        assert_eq!(cli.flag_name, None);
        assert!(cli.slice_flag.is_empty());
    }

    #[test]
    fn unknown_key_fails_apply() {
        let err = resolver("invalid-flag = true")
            .apply(Cli::command())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown configuration key \"invalid-flag\"");
    }

    #[test]
    fn lenient_mode_ignores_unknown_keys() {
        let r = HclConfig::builder()
            .source("invalid-flag = true\nflag-name = \"x\"")
            .strict(false)
            .load()
            .unwrap();
        let cli: Cli = parse(&r, &["app"]);
        assert_eq!(cli.flag_name.as_deref(), Some("x"));
    }

    #[test]
    fn validate_command_reports_unknown_key() {
        let r = resolver("command { typo = 1 }");
        match r.validate_command(&Cli::command()).unwrap_err() {
            HclError::UnknownKey(key) => assert_eq!(key, "command-typo"),
            other => panic!("Expected UnknownKey, got: {other:?}"),
        }
    }

    #[test]
    fn bool_flags_take_config_defaults() {
        #[derive(Debug, Parser)]
        #[command(name = "app")]
        struct BoolCli {
            #[arg(long)]
            verbose: bool,
        }
        let cli: BoolCli = parse(&resolver("verbose = true"), &["app"]);
        assert!(cli.verbose);
    }

    #[test]
    fn config_satisfies_required_flag() {
        #[derive(Debug, Parser)]
        #[command(name = "app")]
        struct RequiredCli {
            #[arg(long)]
            name: String,
        }
        let cli: RequiredCli = parse(&resolver(r#"name = "x""#), &["app"]);
        assert_eq!(cli.name, "x");

        let cli: RequiredCli = parse(&resolver(r#"name = "x""#), &["app", "--name", "y"]);
        assert_eq!(cli.name, "y");
    }

    #[test]
    fn required_flag_without_config_is_still_required() {
        #[derive(Debug, Parser)]
        #[command(name = "app")]
        struct RequiredCli {
            #[arg(long)]
            name: String,
        }
        let cmd = resolver("").apply(RequiredCli::command()).unwrap();
        let err = cmd.try_get_matches_from(["app"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn array_for_single_valued_flag_is_joined() {
        #[derive(Debug, Parser)]
        #[command(name = "app")]
        struct ListCli {
            #[arg(long)]
            names: Option<String>,
        }
        let cli: ListCli = parse(&resolver(r#"names = ["a", "b"]"#), &["app"]);
        assert_eq!(cli.names.as_deref(), Some("a,b"));
    }

    #[test]
    fn raw_fragment_from_config() {
        let cli: FragmentCli = parse(&resolver(FRAGMENT_CONFIG), &["app"]);
        assert_eq!(cli.flag.as_deref(), Some("hello"));
        let frag: Frag = cli.fragment.unwrap().decode().unwrap();
        assert_eq!(frag, expected_frag());
    }

    #[test]
    fn raw_fragment_from_file_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fragment.hcl");
        fs::write(&path, FRAGMENT_BODY).unwrap();

        let cli: FragmentCli = parse(
            &resolver(FRAGMENT_CONFIG),
            &["app", "--fragment", path.to_str().unwrap()],
        );
        let frag: Frag = cli.fragment.unwrap().decode().unwrap();
        assert_eq!(frag, expected_frag());
    }
}
