// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fan tiers: score ranges, display metadata and benefits.
//!
//! The four tiers partition `[0, 100]`:
//!
//! | Tier            | Range    |
//! |-----------------|----------|
//! | Pantera Alfa    | 80..=100 |
//! | Dale Hardcore   | 60..=79  |
//! | Casual Streamer | 40..=59  |
//! | Novato          | 0..=39   |

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Tier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub enum FanScoreTier {
    PanteraAlfa,
    DaleHardcore,
    CasualStreamer,
    Novato,
}

/// Color bundle used by the frontend badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct TierColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub border: &'static str,
    pub background: &'static str,
}

/// A perk unlocked by a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct Benefit {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Static description of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/lib/generated/")
)]
pub struct TierConfig {
    pub tier: FanScoreTier,
    pub min_score: i32,
    pub max_score: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub colors: TierColors,
    pub icon: &'static str,
}

impl TierConfig {
    /// Inclusive on both ends.
    pub fn contains(&self, score: i32) -> bool {
        score >= self.min_score && score <= self.max_score
    }

    pub fn benefits(&self) -> &'static [Benefit; 3] {
        self.tier.benefits()
    }
}

/// All tiers, highest first. [`get_user_tier`] scans in this order.
pub static TIERS: [TierConfig; 4] = [
    TierConfig {
        tier: FanScoreTier::PanteraAlfa,
        min_score: 80,
        max_score: 100,
        title: "Pantera Alfa",
        description: "Você é lenda! Acesso antecipado e meet & greet garantido.",
        colors: TierColors {
            primary: "#FFD700",
            secondary: "#FF8C00",
            border: "#FFD700",
            background: "rgba(255, 215, 0, 0.2)",
        },
        icon: "crown",
    },
    TierConfig {
        tier: FanScoreTier::DaleHardcore,
        min_score: 60,
        max_score: 79,
        title: "Dale Hardcore",
        description: "Você tá com tudo! Que tal um cupom exclusivo e novas missões?",
        colors: TierColors {
            primary: "#FF4500",
            secondary: "#FF7F50",
            border: "#FF4500",
            background: "rgba(255, 69, 0, 0.2)",
        },
        icon: "trophy",
    },
    TierConfig {
        tier: FanScoreTier::CasualStreamer,
        min_score: 40,
        max_score: 59,
        title: "Casual Streamer",
        description: "Curtindo de leve? Receba alertas VIP das melhores lives.",
        colors: TierColors {
            primary: "#8A2BE2",
            secondary: "#9370DB",
            border: "#8A2BE2",
            background: "rgba(138, 43, 226, 0.2)",
        },
        icon: "gamepad",
    },
    TierConfig {
        tier: FanScoreTier::Novato,
        min_score: 0,
        max_score: 39,
        title: "Novato",
        description: "Começando agora? Temos conteúdos e tutoriais só pra você.",
        colors: TierColors {
            primary: "#3498DB",
            secondary: "#00CED1",
            border: "#3498DB",
            background: "rgba(52, 152, 219, 0.2)",
        },
        icon: "rocket",
    },
];

const NOVATO_INDEX: usize = 3;

/// Classify an overall score.
///
/// Scores outside `[0, 100]` never come out of score assignment but can be
/// written by hand; they fall back to Novato.
pub fn get_user_tier(score: i32) -> &'static TierConfig {
    TIERS
        .iter()
        .find(|t| t.contains(score))
        .unwrap_or(&TIERS[NOVATO_INDEX])
}

static PANTERA_ALFA_BENEFITS: [Benefit; 3] = [
    Benefit {
        icon: "ticket-alt",
        title: "Acesso Antecipado",
        description: "Ingressos para eventos antes do público geral",
    },
    Benefit {
        icon: "user-friends",
        title: "Meet & Greet",
        description: "Encontros exclusivos com seus ídolos do e-sports",
    },
    Benefit {
        icon: "gift",
        title: "Itens Exclusivos",
        description: "Acesso a mercadorias e colecionáveis limitados",
    },
];

static DALE_HARDCORE_BENEFITS: [Benefit; 3] = [
    Benefit {
        icon: "tag",
        title: "Cupons Exclusivos",
        description: "Descontos especiais em produtos e eventos",
    },
    Benefit {
        icon: "tasks",
        title: "Missões Especiais",
        description: "Acesso a missões com recompensas exclusivas",
    },
    Benefit {
        icon: "comments",
        title: "Chat Prioritário",
        description: "Atendimento prioritário nos chats de suporte",
    },
];

static CASUAL_STREAMER_BENEFITS: [Benefit; 3] = [
    Benefit {
        icon: "bell",
        title: "Alertas VIP",
        description: "Notificações antecipadas de lives e eventos",
    },
    Benefit {
        icon: "users",
        title: "Comunidade",
        description: "Acesso a grupos de discussão sobre e-sports",
    },
    Benefit {
        icon: "chart-line",
        title: "Estatísticas",
        description: "Acesso a estatísticas exclusivas de jogadores",
    },
];

static NOVATO_BENEFITS: [Benefit; 3] = [
    Benefit {
        icon: "book",
        title: "Tutoriais",
        description: "Conteúdos educativos sobre o mundo dos e-sports",
    },
    Benefit {
        icon: "calendar-alt",
        title: "Calendário Básico",
        description: "Acesso ao calendário de eventos principais",
    },
    Benefit {
        icon: "map-signs",
        title: "Guia Inicial",
        description: "Orientações para começar sua jornada como fã",
    },
];

impl FanScoreTier {
    pub fn benefits(self) -> &'static [Benefit; 3] {
        match self {
            FanScoreTier::PanteraAlfa => &PANTERA_ALFA_BENEFITS,
            FanScoreTier::DaleHardcore => &DALE_HARDCORE_BENEFITS,
            FanScoreTier::CasualStreamer => &CASUAL_STREAMER_BENEFITS,
            FanScoreTier::Novato => &NOVATO_BENEFITS,
        }
    }
}
