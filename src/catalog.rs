//! Fixed option lists for the selection controls, plus the recipe system prompt.

pub struct IngredientCategory {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

pub const INGREDIENT_CATEGORIES: &[IngredientCategory] = &[
    IngredientCategory {
        name: "Vegetables",
        items: &[
            "Potato",
            "Tomato",
            "Onion",
            "Carrot",
            "Bell Pepper",
            "Spinach",
            "Broccoli",
            "Cauliflower",
            "Garlic",
            "Ginger",
            "Green Chilli",
        ],
    },
    IngredientCategory {
        name: "Fruits",
        items: &["Lemon", "Apple", "Banana", "Mango"],
    },
    IngredientCategory {
        name: "Proteins",
        items: &[
            "Chicken",
            "Beef",
            "Pork",
            "Fish",
            "Eggs",
            "Tofu",
            "Lentils",
            "Chickpeas",
        ],
    },
    IngredientCategory {
        name: "Dairy",
        items: &["Milk", "Cheese", "Yogurt", "Butter", "Paneer"],
    },
    IngredientCategory {
        name: "Pantry",
        items: &[
            "Rice",
            "Pasta",
            "Flour",
            "Sugar",
            "Salt",
            "Black Pepper",
            "Olive Oil",
            "Vegetable Oil",
            "Soy Sauce",
            "Vinegar",
        ],
    },
    IngredientCategory {
        name: "Spices",
        items: &[
            "Turmeric",
            "Cumin",
            "Coriander",
            "Red Chilli Powder",
            "Garam Masala",
            "Oregano",
            "Thyme",
            "Rosemary",
        ],
    },
];

pub const CUISINES: &[&str] = &[
    "Any",
    "Indian",
    "Chinese",
    "Italian",
    "Bengali",
    "Thai",
    "Continental",
    "Mexican",
    "Japanese",
];

pub const DIETS: &[&str] = &["Any", "Veg", "Non-veg", "Vegan", "High Protein", "Low-Calorie"];

pub const COOKING_TIMES: &[&str] = &[
    "Any",
    "Under 10 mins",
    "Under 20 mins",
    "Under 30 mins",
    "Long recipes",
];

pub const LANGUAGES: &[&str] = &["English", "Bengali", "Hindi", "Telugu", "Tamil"];

/// Shown when a search succeeds with zero recipes.
pub const NO_RESULTS: &str = "Sorry, the AI chef couldn't find any recipes with that combination of ingredients. Try selecting a few more items or adjusting your preferences!";

pub const SYSTEM_PROMPT: &str = "Yo! You are Smart Recipe AI, a cool and advanced cooking assistant.
Your job is to generate recipes based on user-selected ingredients.

When a user selects ingredients, generate 3–5 recipe suggestions.

Each recipe must include:
✔ Recipe Name (recipeName) - Make it sound delicious!
✔ Short Description (description) - A tasty summary.
✔ Required Ingredients (requiredIngredients)
✔ Cooking Steps (cookingSteps)
✔ Estimated Time (estimatedTime)
✔ Difficulty Level (difficultyLevel)
✔ Serving Size (servingSize)
✔ Optional variations (optionalVariations)
✔ Nutritional Information (nutritionalInfo: calories, protein, carbs, fats)
✔ A shopping list of items NOT provided by the user (shoppingList)
✔ A Drink Pairing suggestion (drinkPairing) - Recommend a beverage that compliments this dish perfectly.

If ingredients are missing for a proper dish, use the 'recommendations' field to suggest what extra items to buy or a simpler dish that works without missing items.

Keep all explanations simple, clear, and super friendly. Feel free to start with \"Yo!\" or use casual language where appropriate, but keep the cooking instructions precise and safe.
Reply in the language specified in the user prompt. Default to English if not specified.
You must not generate harmful or unsafe cooking instructions.
You must respond in the specified JSON format.";

/// Every catalog ingredient in category order.
pub fn all_ingredients() -> impl Iterator<Item = &'static str> {
    INGREDIENT_CATEGORIES
        .iter()
        .flat_map(|category| category.items.iter().copied())
}
