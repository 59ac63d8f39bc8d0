use serde::{Deserialize, Serialize};

/// The fixed conformity-checklist catalog: 10 items, stable wire keys.
///
/// The wire keys are the exact `item` strings already stored by previous
/// versions of the system (including the historical "PLACA_IMETRO" spelling);
/// renaming one would orphan every existing row under the old key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChecklistItem {
    Etiqueta,
    PlacaInmetro,
    TesteAbs,
    Rodagem,
    Graxeiras,
    SistemaAtuacao,
    CatracaFreio,
    TampaCubo,
    PinturaEixo,
    Solda,
}

impl ChecklistItem {
    /// Catalog in form order
    pub const ALL: [ChecklistItem; 10] = [
        Self::Etiqueta,
        Self::PlacaInmetro,
        Self::TesteAbs,
        Self::Rodagem,
        Self::Graxeiras,
        Self::SistemaAtuacao,
        Self::CatracaFreio,
        Self::TampaCubo,
        Self::PinturaEixo,
        Self::Solda,
    ];

    /// Stable key stored in the `item` column
    pub fn key(&self) -> &'static str {
        match self {
            Self::Etiqueta => "ETIQUETA",
            Self::PlacaInmetro => "PLACA_IMETRO E NÚMERO DE SÉRIE",
            Self::TesteAbs => "TESTE_ABS",
            Self::Rodagem => "RODAGEM_MODELO",
            Self::Graxeiras => "GRAXEIRAS E ANÉIS ELÁSTICOS",
            Self::SistemaAtuacao => "SISTEMA_ATUACAO",
            Self::CatracaFreio => "CATRACA_FREIO",
            Self::TampaCubo => "TAMPA_CUBO",
            Self::PinturaEixo => "PINTURA_EIXO",
            Self::Solda => "SOLDA",
        }
    }

    /// Question text shown on the inspection form
    pub fn question(&self) -> &'static str {
        match self {
            Self::Etiqueta => {
                "Etiqueta do produto – As informações estão corretas / legíveis conforme modelo e gravação do eixo?"
            }
            Self::PlacaInmetro => {
                "Placa do Inmetro está correta / fixada e legível? Número corresponde à viga? Gravação do número de série da viga está legível e pintada?"
            }
            Self::TesteAbs => {
                "Etiqueta do ABS está conforme? Com número de série compatível ao da viga? Teste do ABS está aprovado?"
            }
            Self::Rodagem => "Rodagem – tipo correto? Especifique o modelo",
            Self::Graxeiras => "Graxeiras e Anéis elásticos estão em perfeito estado?",
            Self::SistemaAtuacao => {
                "Sistema de atuação correto? Springs ou cuícas em perfeitas condições? Especifique o modelo:"
            }
            Self::CatracaFreio => "Catraca do freio correta? Especifique modelo",
            Self::TampaCubo => {
                "Tampa do cubo correta, livre de avarias e pintura nos critérios? As tampas dos cubos dos ambos os lados são iguais?"
            }
            Self::PinturaEixo => {
                "Pintura do eixo livre de oxidação, isento de escorrimento na pintura, pontos sem tinta e camada conforme padrão?"
            }
            Self::Solda => "Os cordões de solda do eixo estão conformes?",
        }
    }

    /// Fixed option list for items that require a model selection.
    ///
    /// `Solda` reuses the mechanism for weld-defect categories rather than
    /// product variants; the stored column is the same either way.
    pub fn model_options(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Rodagem => Some(&["Single", "Aço", "Alumínio", "N/A"]),
            Self::SistemaAtuacao => Some(&["Spring", "Cuíca", "N/A"]),
            Self::CatracaFreio => Some(&["Automático", "Manual", "N/A"]),
            Self::Solda => Some(&[
                "Conforme",
                "Respingo",
                "Falta de cordão",
                "Porosidade",
                "Falta de Fusão",
            ]),
            _ => None,
        }
    }

    /// True for the items whose submission must carry a model selection
    pub fn requires_model(&self) -> bool {
        self.model_options().is_some()
    }

    /// Resolve a stored wire key back to the catalog item
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.key() == key)
    }
}

impl std::fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Render a list of items as their wire keys, for error messages
pub fn join_keys(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| item.key())
        .collect::<Vec<_>>()
        .join(", ")
}
