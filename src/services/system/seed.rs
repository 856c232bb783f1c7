use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SystemService;
use crate::models::{ApiResponse, system::responses::SeedResponse};
use crate::services::internal_error;
use crate::storage::TaxonomySeed;

const GRADES: [&str; 4] = ["1. ročník", "2. ročník", "3. ročník", "4. ročník"];

const SUBJECTS: [(&str, &str); 24] = [
    ("Matematika", "Algebra, geometria, funkcie, pravdepodobnosť"),
    ("Slovenský jazyk a literatúra", "Gramatika, sloh, literatúra"),
    ("Anglický jazyk", "Angličtina pre stredné školy"),
    ("Nemecký jazyk", "Nemčina pre stredné školy"),
    ("Francúzsky jazyk", "Francúzština pre stredné školy"),
    ("Ruský jazyk", "Ruština pre stredné školy"),
    ("Fyzika", "Mechanika, termodynamika, elektrina, optika"),
    ("Chémia", "Organická a anorganická chémia, biochémia"),
    ("Biológia", "Botanika, zoológia, anatómia, genetika"),
    ("Geografia", "Fyzická a humánna geografia"),
    ("Dejepis", "Svetové a slovenské dejiny"),
    ("Občianska náuka", "Právo, politológia, sociológia"),
    ("Informatika", "Programovanie, databázy, siete"),
    ("Ekonomika", "Základy ekonómie a podnikania"),
    ("Účtovníctvo", "Finančné a manažérske účtovníctvo"),
    ("Telesná výchova", "Šport a zdravý životný štýl"),
    ("Výtvarná výchova", "Kresba, maľba, dejiny umenia"),
    ("Hudobná výchova", "Hudba, spev, dejiny hudby"),
    ("Etická výchova", "Morálka, etika, hodnoty"),
    ("Náboženská výchova", "Náboženstvo a duchovné hodnoty"),
    ("Psychológia", "Základy psychológie"),
    ("Filozofia", "Dejiny filozofie, logika"),
    ("Technická výchova", "Technické kreslenie, práca s materiálmi"),
    ("Administratíva a korešpondencia", "Písomná komunikácia, kancelárska práca"),
];

/// (班级名, 年级下标)
const CLASSES: [(&str, usize); 4] = [("1.A", 0), ("1.B", 0), ("2.A", 1), ("2.B", 1)];

/// 标准的斯洛伐克中学分类数据
pub fn standard_taxonomy() -> TaxonomySeed {
    TaxonomySeed {
        grades: GRADES
            .iter()
            .zip(1..)
            .map(|(name, order)| (name.to_string(), order))
            .collect(),
        subjects: SUBJECTS
            .iter()
            .map(|(name, description)| (name.to_string(), Some(description.to_string())))
            .collect(),
        classes: CLASSES
            .iter()
            .map(|(name, grade)| (name.to_string(), *grade))
            .collect(),
    }
}

pub async fn seed_data(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let seed = standard_taxonomy();
    let counts = SeedResponse {
        seeded: true,
        grades: seed.grades.len(),
        subjects: seed.subjects.len(),
        classes: seed.classes.len(),
    };

    match storage.seed_taxonomy(seed).await {
        Ok(true) => {
            info!(
                "Seeded {} grades, {} subjects, {} classes",
                counts.grades, counts.subjects, counts.classes
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(counts, "Dáta boli vytvorené")))
        }
        Ok(false) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SeedResponse {
                seeded: false,
                grades: 0,
                subjects: 0,
                classes: 0,
            },
            "Dáta už existujú",
        ))),
        Err(e) => Ok(internal_error("Failed to seed data", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_taxonomy_shape() {
        let seed = standard_taxonomy();
        assert_eq!(seed.grades.len(), 4);
        assert_eq!(seed.grades[3], ("4. ročník".to_string(), 4));
        assert_eq!(seed.subjects.len(), 24);
        assert!(seed.classes.iter().all(|(_, g)| *g < seed.grades.len()));
    }
}
