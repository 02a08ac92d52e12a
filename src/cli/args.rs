use crate::generators::TestKind;

/// Last stage the `run` command executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, clap::ValueEnum)]
pub enum Stage {
    Steps,
    Data,
    #[default]
    Script,
}

/// Common arguments shared by all commands
#[derive(Debug, Clone)]
pub struct CommonArgs {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Arguments specific to run command
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub common: CommonArgs,
    pub transaction_code: String,
    pub title: String,
    pub kind: TestKind,
    pub until: Stage,
}

/// Arguments specific to session command
#[derive(Debug, Clone)]
pub struct SessionArgs {
    pub verbose: bool,
}

/// Arguments specific to config command
#[derive(Debug, Clone)]
pub struct ConfigArgs {
    pub show: bool,
    pub init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Steps < Stage::Data);
        assert!(Stage::Data < Stage::Script);
        assert_eq!(Stage::default(), Stage::Script);
    }
}
