//src/catalog.rs
//! Static reference data: the exercise catalog, the muscle groups a training
//! day can target and the body measurements that can be recorded.

/// Number of independent exercise rows offered by the workout logging form.
pub const MAX_LOG_EXERCISE_SLOTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCategory {
    pub key: &'static str,
    pub items: &'static [CatalogItem],
}

const fn item(id: &'static str, name: &'static str) -> CatalogItem {
    CatalogItem { id, name }
}

pub const EXERCISE_CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        key: "Peito",
        items: &[
            item("peito_supino_reto", "Supino Reto (com barra ou máquina)"),
            item("peito_supino_inclinado_declinado", "Supino Inclinado/Declinado"),
            item("peito_crossover", "Crossover (ou Polia Crossover)"),
            item("peito_peck_deck", "Peck Deck (Crucifixo na máquina)"),
            item("peito_flexao_solo", "Flexão no solo (peso corporal)"),
        ],
    },
    CatalogCategory {
        key: "Costas",
        items: &[
            item("costas_puxada_frente", "Puxada na frente (Pulldown)"),
            item("costas_remada_baixa", "Remada baixa"),
            item("costas_remada_unilateral_halteres", "Remada unilateral com halteres"),
            item("costas_remada_cavalinho", "Remada cavalinho (T-Bar Row)"),
            item("costas_barra_fixa", "Barra fixa (ou máquina assistida)"),
        ],
    },
    CatalogCategory {
        key: "Bíceps",
        items: &[
            item("biceps_rosca_direta", "Rosca direta (barra)"),
            item("biceps_rosca_alternada", "Rosca alternada (halteres)"),
            item("biceps_rosca_concentrada", "Rosca concentrada"),
            item("biceps_rosca_scott", "Rosca scott (máquina ou banco)"),
        ],
    },
    CatalogCategory {
        key: "Tríceps",
        items: &[
            item("triceps_polia", "Tríceps na polia (corda ou barra)"),
            item("triceps_testa", "Tríceps testa (com barra W ou halteres)"),
            item("triceps_banco", "Tríceps banco (peso corporal)"),
        ],
    },
    CatalogCategory {
        key: "Ombros",
        items: &[
            item("ombros_desenvolvimento", "Desenvolvimento com halteres ou máquina"),
            item("ombros_elevacao_lateral", "Elevação lateral (halteres ou polia)"),
            item("ombros_elevacao_frontal", "Elevação frontal"),
            item("ombros_remada_alta", "Remada alta"),
            item("ombros_crucifixo_inverso", "Crucifixo invertido (deltoide posterior)"),
        ],
    },
    CatalogCategory {
        key: "Quadríceps e Glúteos",
        items: &[
            item("quads_leg_press", "Leg Press"),
            item("quads_agachamento", "Agachamento (livre ou guiado)"),
            item("quads_extensora", "Extensora"),
            item("quads_avanco", "Avanço (passada com halteres ou barra)"),
        ],
    },
    CatalogCategory {
        key: "Posteriores de Coxa",
        items: &[
            item("postcoxa_mesa_flexora", "Mesa flexora (leg curl)"),
            item("postcoxa_stiff", "Stiff (com barra ou halteres)"),
        ],
    },
    CatalogCategory {
        key: "Panturrilha",
        items: &[
            item("pant_elevacao_sentado", "Elevação na máquina sentado"),
            item("pant_elevacao_pe", "Elevação em pé (Smith ou máquina específica)"),
        ],
    },
    CatalogCategory {
        key: "Abdômen",
        items: &[
            item("abs_solo", "Abdominal no solo (reto, oblíquo)"),
            item("abs_maquina", "Abdominal na máquina"),
            item("abs_elevacao_pernas_paralela", "Elevação de pernas na paralela"),
            item("abs_prancha", "Prancha isométrica (peso corporal)"),
        ],
    },
];

/// Labels a training day can be tagged with, in display order.
pub const MUSCLE_GROUPS: &[&str] = &[
    "Braços",
    "Ombros",
    "Costas",
    "Peito",
    "Pernas",
    "Abdômen",
    "Cardio",
    "Full Body",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub step: f64,
}

const fn measure(
    key: &'static str,
    name: &'static str,
    unit: &'static str,
    step: f64,
) -> MeasurementDefinition {
    MeasurementDefinition {
        key,
        name,
        unit,
        step,
    }
}

/// Ordered definitions; validation reports offenders in this order.
pub const BODY_MEASUREMENTS: &[MeasurementDefinition] = &[
    measure("peso", "Peso Corporal", "kg", 0.1),
    measure("altura", "Altura", "cm", 0.5),
    measure("percGordura", "Percentual de Gordura", "%", 0.1),
    measure("imc", "IMC", "", 0.1),
    measure("peitoral", "Peitoral (Tórax)", "cm", 0.5),
    measure("bracoDirCont", "Braço Direito (contraído)", "cm", 0.5),
    measure("bracoEsqCont", "Braço Esquerdo (contraído)", "cm", 0.5),
    measure("antebracoDir", "Antebraço Direito (relaxado)", "cm", 0.5),
    measure("antebracoEsq", "Antebraço Esquerdo (relaxado)", "cm", 0.5),
    measure("cintura", "Cintura", "cm", 0.5),
    measure("abdomen", "Abdômen (Barriga)", "cm", 0.5),
    measure("quadril", "Quadril (Glúteos)", "cm", 0.5),
    measure("coxaDir", "Coxa Direita", "cm", 0.5),
    measure("coxaEsq", "Coxa Esquerda", "cm", 0.5),
    measure("panturrilhaDir", "Panturrilha Direita", "cm", 0.5),
    measure("panturrilhaEsq", "Panturrilha Esquerda", "cm", 0.5),
    measure("pescoco", "Pescoço", "cm", 0.5),
    measure("ombros", "Ombros (Circunferência)", "cm", 0.5),
];

pub fn category(key: &str) -> Option<&'static CatalogCategory> {
    EXERCISE_CATALOG.iter().find(|c| c.key == key)
}

pub fn category_keys() -> impl Iterator<Item = &'static str> {
    EXERCISE_CATALOG.iter().map(|c| c.key)
}

/// Items offered for a category; empty when the category is unknown.
pub fn items_for(category_key: &str) -> &'static [CatalogItem] {
    category(category_key).map(|c| c.items).unwrap_or(&[])
}

/// Resolves a (category, item) reference against the catalog.
pub fn find_exercise(category_key: &str, item_key: &str) -> Option<&'static CatalogItem> {
    items_for(category_key).iter().find(|i| i.id == item_key)
}

pub fn is_muscle_group(label: &str) -> bool {
    MUSCLE_GROUPS.contains(&label)
}
