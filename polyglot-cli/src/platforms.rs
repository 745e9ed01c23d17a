use polyglot::{Platform, ResourceType};

/// Export target selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformArg {
    /// `values[-<locale>]/strings.xml`
    Android,
    /// `<locale>.lproj/Localizable.strings` and `Localizable.stringsdict`
    Ios,
    /// Both platforms
    All,
}

impl PlatformArg {
    pub fn platforms(self) -> Vec<Platform> {
        match self {
            PlatformArg::Android => vec![Platform::Android],
            PlatformArg::Ios => vec![Platform::Ios],
            PlatformArg::All => Platform::ALL.to_vec(),
        }
    }
}

/// Resource table selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceTypeArg {
    Strings,
    Plurals,
    Arrays,
}

impl From<ResourceTypeArg> for ResourceType {
    fn from(value: ResourceTypeArg) -> Self {
        match value {
            ResourceTypeArg::Strings => ResourceType::Strings,
            ResourceTypeArg::Plurals => ResourceType::Plurals,
            ResourceTypeArg::Arrays => ResourceType::Arrays,
        }
    }
}
