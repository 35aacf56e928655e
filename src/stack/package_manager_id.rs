crate::define_id_enum! {
    /// JavaScript package managers the build step knows how to drive
    PackageManagerId {
        Npm => "npm",
        Yarn => "yarn",
        Pnpm => "pnpm",
        Bun => "bun",
    }
}

/// Lock files in tie-break order. A project that carries several of them is
/// attributed to the first one found here.
pub const LOCK_FILES: &[(&str, PackageManagerId)] = &[
    ("pnpm-lock.yaml", PackageManagerId::Pnpm),
    ("yarn.lock", PackageManagerId::Yarn),
    ("package-lock.json", PackageManagerId::Npm),
    ("npm-shrinkwrap.json", PackageManagerId::Npm),
    ("bun.lockb", PackageManagerId::Bun),
    ("bun.lock", PackageManagerId::Bun),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate {
    pub install: &'static str,
    pub exec: &'static str,
}

const COMMANDS: &[(PackageManagerId, CommandTemplate)] = &[
    (
        PackageManagerId::Npm,
        CommandTemplate {
            install: "npm ci",
            exec: "npx",
        },
    ),
    (
        PackageManagerId::Yarn,
        CommandTemplate {
            install: "yarn install",
            exec: "yarn exec",
        },
    ),
    (
        PackageManagerId::Pnpm,
        CommandTemplate {
            install: "pnpm install",
            exec: "pnpm exec",
        },
    ),
    (
        PackageManagerId::Bun,
        CommandTemplate {
            install: "bun install",
            exec: "bunx",
        },
    ),
];

impl PackageManagerId {
    pub fn commands(&self) -> CommandTemplate {
        COMMANDS
            .iter()
            .find(|(id, _)| id == self)
            .map(|(_, template)| *template)
            .unwrap_or(CommandTemplate {
                install: "",
                exec: "",
            })
    }

    /// Name of the CI output carrying this manager's pinned version
    pub fn version_output(&self) -> &'static str {
        match self {
            Self::Npm => "npm-version",
            Self::Yarn => "yarn-version",
            Self::Pnpm => "pnpm-version",
            Self::Bun => "bun-version",
        }
    }
}
