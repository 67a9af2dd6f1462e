//! Built-in seed dataset, used when no stored glossary can be read.

use crate::types::{Category, GlossaryTerm, TermId};

/// The three starter entries shipped with the console.
pub fn seed_terms() -> Vec<GlossaryTerm> {
    vec![
        GlossaryTerm::new(
            TermId(1),
            "金型",
            "Бүтээгдэхүүнийг хэлбэржүүлэн цутгахад ашигладаг төмөр хэв.",
        )
        .with_reading("かながた")
        .with_alias("モールド")
        .with_english("Mold / Die")
        .with_meanings(
            "A tool used in manufacturing for shaping objects by casting or injection.",
            "製造業において、鋳造や射出などで物体を成形するために使用される金属製の型。",
        )
        .with_category(Category::ResinDie),
        GlossaryTerm::new(
            TermId(2),
            "射出成形",
            "Хайлуулсан давирхайг өндөр даралтаар хэвэнд шахаж хэлбэр гаргах арга.",
        )
        .with_reading("しゃしゅつせいけい")
        .with_alias("インジェクション")
        .with_english("Injection Molding")
        .with_meanings(
            "A manufacturing process for producing parts by injecting molten material into a mold.",
            "溶融した材料を金型に注入して部品を製造する加工方法。",
        )
        .with_category(Category::ResinMolding),
        GlossaryTerm::new(
            TermId(3),
            "バリ",
            "Цутгалтын дараа бүтээгдэхүүний ирмэгээр гарсан илүүдэл материал.",
        )
        .with_reading("ばり")
        .with_alias("フラッシュ")
        .with_english("Burr / Flash")
        .with_meanings(
            "Excess material or a rough edge remaining on a part after casting or molding.",
            "鋳造や成形後に部品に残る余分な材料や粗いエッジ。",
        )
        .with_category(Category::ResinMolding),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let terms = seed_terms();
        let ids: Vec<u64> = terms.iter().map(|t| t.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(terms
            .iter()
            .all(|t| !t.word.is_empty() && !t.meanings.mn.is_empty()));
    }
}
