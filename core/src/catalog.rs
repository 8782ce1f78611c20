//! The static dish catalog plus the small lookup tables derived from it:
//! cuisines, activity factors, and the lower-calorie alternative map.

use std::sync::LazyLock;

use crate::models::{ALL, Dish};

pub const CUISINES: &[&str] = &[
    "全部", "本帮菜", "川菜", "粤菜", "东北菜", "鲁菜", "淮扬菜", "浙菜", "苏菜", "西北菜",
    "家常菜", "北方菜", "江南菜", "台湾菜", "湖南菜", "西式", "自定义",
];

/// Exercise factors: `minutes = round(total_calories / factor)`.
/// Illustrative constants, not physiology.
pub const ACTIVITY_FACTORS: &[(&str, f64)] = &[
    ("跑步", 0.1),
    ("步行", 0.05),
    ("游泳", 0.08),
    ("骑行", 0.06),
    ("跳绳", 0.12),
    ("瑜伽", 0.03),
    ("跳操", 0.07),
    ("爬山", 0.08),
];

#[must_use]
pub fn activity_factor(name: &str) -> Option<f64> {
    ACTIVITY_FACTORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, f)| f)
}

/// Lower-calorie substitutes keyed by dish display name:
/// `(original, alternative, calorie_diff_per_100g)`. The diff is negative
/// (calories saved). Keying on names is fragile — renaming a catalog dish
/// silently breaks its mapping — but is preserved for compatibility.
pub const ALTERNATIVE_DISHES: &[(&str, &str, f64)] = &[
    ("红烧肉", "清蒸鲈鱼", -210.0),
    ("糖醋排骨", "口水鸡", -140.0),
    ("红烧狮子头", "白切鸡", -160.0),
    ("梅菜扣肉", "清蒸大闸蟹", -260.0),
    ("东坡肉", "清蒸鲈鱼", -230.0),
    ("红烧猪蹄", "香酥鸭", -120.0),
    ("红烧肉面", "扬州炒饭", -70.0),
    ("炒年糕", "饺子", -70.0),
    ("麻团", "蛋挞", -140.0),
    ("炸丸子", "春卷", -60.0),
];

#[must_use]
pub fn alternative_for(dish_name: &str) -> Option<(&'static str, f64)> {
    ALTERNATIVE_DISHES
        .iter()
        .find(|(original, _, _)| *original == dish_name)
        .map(|&(_, alt, diff)| (alt, diff))
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: i64,
    name: &str,
    calories: f64,
    cuisine: &str,
    dish_type: &str,
    portion: i64,
    icon: &str,
    protein: f64,
    fat: f64,
    carbs: f64,
) -> Dish {
    Dish {
        id,
        name: name.to_string(),
        calories,
        cuisine: cuisine.to_string(),
        dish_type: dish_type.to_string(),
        portion,
        icon: icon.to_string(),
        protein,
        fat,
        carbs,
        custom: false,
    }
}

static DISHES: LazyLock<Vec<Dish>> = LazyLock::new(|| {
    vec![
        // 荤菜
        dish(1, "红烧肉", 320.0, "本帮菜", "荤菜", 150, "🥩", 18.0, 24.0, 3.0),
        dish(2, "糖醋排骨", 280.0, "本帮菜", "荤菜", 150, "🍖", 20.0, 18.0, 12.0),
        dish(3, "清蒸鲈鱼", 110.0, "粤菜", "荤菜", 200, "🐟", 20.0, 2.0, 0.0),
        dish(4, "红烧鱼", 180.0, "本帮菜", "荤菜", 150, "🐟", 22.0, 8.0, 5.0),
        dish(5, "宫保鸡丁", 160.0, "川菜", "荤菜", 150, "🍗", 18.0, 8.0, 10.0),
        dish(6, "口水鸡", 140.0, "川菜", "荤菜", 150, "🍗", 20.0, 6.0, 5.0),
        dish(7, "白切鸡", 120.0, "粤菜", "荤菜", 150, "🍗", 22.0, 3.0, 0.0),
        dish(8, "北京烤鸭", 240.0, "鲁菜", "荤菜", 100, "🦆", 16.0, 18.0, 2.0),
        dish(9, "梅菜扣肉", 350.0, "粤菜", "荤菜", 150, "🥓", 15.0, 30.0, 8.0),
        dish(10, "红烧狮子头", 280.0, "淮扬菜", "荤菜", 150, "🍖", 18.0, 20.0, 8.0),
        dish(11, "水煮鱼", 200.0, "川菜", "荤菜", 150, "🐟", 18.0, 12.0, 8.0),
        dish(12, "麻婆豆腐", 120.0, "川菜", "荤菜", 150, "🍲", 10.0, 8.0, 6.0),
        dish(13, "回锅肉", 300.0, "川菜", "荤菜", 150, "🥩", 18.0, 24.0, 5.0),
        dish(14, "酸菜鱼", 140.0, "川菜", "荤菜", 150, "🐟", 16.0, 6.0, 8.0),
        dish(15, "东坡肉", 340.0, "浙菜", "荤菜", 150, "🥩", 16.0, 28.0, 5.0),
        dish(16, "蒜蓉扇贝", 100.0, "粤菜", "荤菜", 100, "🦪", 16.0, 2.0, 6.0),
        dish(17, "清蒸大闸蟹", 90.0, "苏菜", "荤菜", 100, "🦀", 16.0, 2.0, 2.0),
        dish(18, "红烧猪蹄", 380.0, "本帮菜", "荤菜", 150, "🍖", 16.0, 32.0, 5.0),
        dish(19, "香酥鸭", 260.0, "粤菜", "荤菜", 150, "🦆", 18.0, 20.0, 4.0),
        dish(20, "红烧牛肉", 180.0, "川菜", "荤菜", 150, "🥩", 22.0, 10.0, 5.0),
        // 素菜
        dish(21, "蒜蓉西兰花", 35.0, "粤菜", "素菜", 150, "🥦", 3.0, 0.5, 7.0),
        dish(22, "干煸四季豆", 60.0, "川菜", "素菜", 150, "🫘", 3.0, 3.0, 8.0),
        dish(23, "麻婆豆腐（素）", 90.0, "川菜", "素菜", 150, "🍲", 6.0, 6.0, 6.0),
        dish(24, "酸辣土豆丝", 70.0, "川菜", "素菜", 150, "🥔", 2.0, 3.0, 12.0),
        dish(25, "香菇青菜", 40.0, "本帮菜", "素菜", 150, "🍄", 3.0, 1.0, 7.0),
        dish(26, "红烧茄子", 80.0, "本帮菜", "素菜", 150, "🍆", 2.0, 5.0, 9.0),
        dish(27, "蚝油生菜", 35.0, "粤菜", "素菜", 150, "🥬", 2.0, 1.0, 6.0),
        dish(28, "上汤娃娃菜", 50.0, "粤菜", "素菜", 150, "🥬", 3.0, 2.0, 7.0),
        dish(29, "地三鲜", 90.0, "东北菜", "素菜", 150, "🍆", 3.0, 5.0, 10.0),
        dish(30, "凉拌黄瓜", 20.0, "川菜", "素菜", 150, "🥒", 1.0, 0.5, 4.0),
        dish(31, "松仁玉米", 95.0, "东北菜", "素菜", 150, "🌽", 4.0, 4.0, 12.0),
        dish(32, "糖醋藕片", 60.0, "本帮菜", "素菜", 150, "🌾", 2.0, 0.5, 14.0),
        dish(33, "拍黄瓜", 18.0, "川菜", "素菜", 150, "🥒", 1.0, 0.5, 4.0),
        dish(34, "蒜蓉油麦菜", 28.0, "粤菜", "素菜", 150, "🥬", 2.0, 0.5, 5.0),
        dish(35, "凉拌木耳", 30.0, "东北菜", "素菜", 150, "🍄", 2.0, 0.5, 6.0),
        // 汤品
        dish(36, "西红柿鸡蛋汤", 40.0, "家常菜", "汤品", 200, "🥣", 3.0, 2.0, 4.0),
        dish(37, "排骨汤", 100.0, "家常菜", "汤品", 200, "🍲", 8.0, 6.0, 4.0),
        dish(38, "鸡汤", 80.0, "家常菜", "汤品", 200, "🥣", 8.0, 4.0, 2.0),
        dish(39, "冬瓜丸子汤", 60.0, "家常菜", "汤品", 200, "🥣", 6.0, 3.0, 4.0),
        dish(40, "鲫鱼豆腐汤", 70.0, "粤菜", "汤品", 200, "🐟", 10.0, 3.0, 3.0),
        dish(41, "羊肉汤", 140.0, "西北菜", "汤品", 200, "🥣", 10.0, 8.0, 5.0),
        dish(42, "菌菇汤", 45.0, "粤菜", "汤品", 200, "🍄", 3.0, 2.0, 5.0),
        dish(43, "紫菜蛋花汤", 35.0, "家常菜", "汤品", 200, "🥣", 3.0, 1.0, 4.0),
        dish(44, "酸菜白肉汤", 110.0, "东北菜", "汤品", 200, "🥣", 8.0, 6.0, 8.0),
        dish(45, "花胶鸡汤", 85.0, "粤菜", "汤品", 200, "🐔", 12.0, 3.0, 2.0),
        // 主食
        dish(46, "饺子", 180.0, "北方菜", "主食", 200, "🥟", 8.0, 6.0, 28.0),
        dish(47, "红烧肉面", 350.0, "本帮菜", "主食", 200, "🍜", 12.0, 12.0, 48.0),
        dish(48, "炒年糕", 250.0, "家常菜", "主食", 200, "🍚", 6.0, 8.0, 42.0),
        dish(49, "扬州炒饭", 280.0, "淮扬菜", "主食", 200, "🍚", 10.0, 10.0, 40.0),
        dish(50, "牛肉面", 300.0, "川菜", "主食", 200, "🍜", 14.0, 10.0, 42.0),
        dish(51, "油泼面", 350.0, "西北菜", "主食", 200, "🍜", 12.0, 14.0, 48.0),
        dish(52, "小笼包", 160.0, "苏菜", "主食", 150, "🥟", 6.0, 6.0, 24.0),
        dish(53, "白米饭", 150.0, "家常菜", "主食", 150, "🍚", 3.0, 0.5, 34.0),
        dish(54, "八宝饭", 220.0, "江南菜", "主食", 150, "🍚", 4.0, 4.0, 44.0),
        dish(55, "汤圆", 120.0, "江南菜", "主食", 150, "🥟", 3.0, 2.0, 24.0),
        // 点心
        dish(56, "春卷", 200.0, "本帮菜", "点心", 100, "🌯", 4.0, 10.0, 24.0),
        dish(57, "炸鸡排", 280.0, "台湾菜", "点心", 100, "🍗", 18.0, 16.0, 14.0),
        dish(58, "蛋挞", 180.0, "粤菜", "点心", 50, "🥧", 4.0, 10.0, 18.0),
        dish(59, "麻团", 320.0, "粤菜", "点心", 80, "🍩", 4.0, 16.0, 38.0),
        dish(60, "炸丸子", 260.0, "北方菜", "点心", 100, "🍖", 12.0, 14.0, 18.0),
        dish(61, "糖油粑粑", 280.0, "湖南菜", "点心", 100, "🍡", 4.0, 12.0, 36.0),
        dish(62, "炸鸡翅", 240.0, "粤菜", "点心", 100, "🍗", 16.0, 14.0, 12.0),
        dish(63, "炸鱼排", 220.0, "粤菜", "点心", 100, "🐟", 16.0, 12.0, 10.0),
        dish(64, "炸薯条", 320.0, "西式", "点心", 100, "🍟", 4.0, 16.0, 40.0),
        dish(65, "炸鸡块", 290.0, "西式", "点心", 100, "🍗", 16.0, 16.0, 18.0),
    ]
});

#[must_use]
pub fn dishes() -> &'static [Dish] {
    &DISHES
}

#[must_use]
pub fn dish_by_id(id: i64) -> Option<&'static Dish> {
    DISHES.iter().find(|d| d.id == id)
}

/// Order-preserving cuisine/type filter. The `全部` sentinel (or an empty
/// string) matches everything.
#[must_use]
pub fn filter_dishes<'a>(dishes: &'a [Dish], cuisine: &str, dish_type: &str) -> Vec<&'a Dish> {
    dishes
        .iter()
        .filter(|d| {
            let cuisine_match = cuisine.is_empty() || cuisine == ALL || d.cuisine == cuisine;
            let type_match = dish_type.is_empty() || dish_type == ALL || d.dish_type == dish_type;
            cuisine_match && type_match
        })
        .collect()
}
