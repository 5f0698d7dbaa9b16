use zerosight_types::Role;

/// Navigation areas of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Reports,
    Threats,
    Incidents,
    Admin,
}

impl Section {
    /// Navigation order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Reports,
        Section::Threats,
        Section::Incidents,
        Section::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Reports => "reports",
            Section::Threats => "threats",
            Section::Incidents => "incidents",
            Section::Admin => "admin",
        }
    }

    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Section::Home | Section::Reports => &Role::ALL,
            Section::Threats => &[Role::Admin, Role::SocAnalyst],
            Section::Incidents => &[Role::Admin, Role::SocAnalyst, Role::Pentester],
            Section::Admin => &[Role::Admin],
        }
    }

    pub fn is_open_to(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

pub fn sections_for(role: Role) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| s.is_open_to(role))
        .collect()
}
