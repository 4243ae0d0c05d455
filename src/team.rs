/// The simulated teammates the backend routes questions to. The ids match
/// the agent keys the ask endpoint accepts as `target_agent`.
#[derive(Debug, Clone, Copy)]
pub struct TeamMember {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
}

pub const TEAM: [TeamMember; 4] = [
    TeamMember {
        id: "yug",
        name: "Yug",
        role: "Frontend",
    },
    TeamMember {
        id: "sean",
        name: "Sean",
        role: "Backend",
    },
    TeamMember {
        id: "severin",
        name: "Severin",
        role: "Full stack / PM",
    },
    TeamMember {
        id: "nayab",
        name: "Nayab",
        role: "Coordination & Infra",
    },
];
