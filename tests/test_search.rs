use mockito::Matcher;
use recipe_finder::{
    IngredientQuery, NameQuery, NutrientQuery, RecipeError, RecipeFinder, RecipeService,
};

fn service(url: String) -> RecipeService {
    RecipeFinder::builder()
        .api_key("test_key")
        .base_url(url)
        .placeholder_image("placeholder.png")
        .build()
        .unwrap()
}

fn ingredient_hits(count: u64) -> String {
    let hits: Vec<_> = (1..=count)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Recipe {id}"),
                "image": format!("https://img.spoonacular.com/recipes/{id}.jpg"),
                "usedIngredientCount": 1,
                "missedIngredientCount": 2,
                "usedIngredients": [{"name": "apples"}],
                "missedIngredients": [{"name": "sugar"}, {"name": "flour"}],
                "unusedIngredients": []
            })
        })
        .collect();
    serde_json::to_string(&hits).unwrap()
}

#[tokio::test]
async fn test_find_by_ingredients_paginates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ingredients".into(), "apples,sugar".into()),
            Matcher::UrlEncoded("number".into(), "20".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ingredient_hits(12))
        .create_async()
        .await;

    let mut query = IngredientQuery::new(["apples", "sugar"]);
    query.offset = 10;
    query.limit = Some(5);

    let recipes = service(server.url()).find_by_ingredients(&query).await.unwrap();

    let ids: Vec<u64> = recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![11, 12]);
    assert_eq!(recipes[0].missing_ingredient_count, 2);
    assert_eq!(recipes[0].missed_ingredients.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_by_ingredients_filters_dish_type() {
    let mut server = mockito::Server::new_async().await;
    let _search = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ingredient_hits(3))
        .create_async()
        .await;
    let _first = server
        .mock("GET", "/recipes/1/information")
        .match_query(Matcher::UrlEncoded("includeNutrition".into(), "false".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "dishTypes": ["Dessert"]}"#)
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/recipes/2/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 2, "dishTypes": ["main course"]}"#)
        .create_async()
        .await;
    let _third = server
        .mock("GET", "/recipes/3/information")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let mut query = IngredientQuery::new(["apples"]);
    query.dish_type = Some("dessert".to_string());

    let recipes = service(server.url()).find_by_ingredients(&query).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, 1);
}

#[tokio::test]
async fn test_invalid_query_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let query = IngredientQuery::new(Vec::<String>::new());
    let err = service(server.url())
        .find_by_ingredients(&query)
        .await
        .unwrap_err();

    assert!(matches!(err, RecipeError::Validation(_)));
    assert_eq!(err.status_code(), 400);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_by_nutrients_sends_bounds() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("maxCalories".into(), "500".into()),
            Matcher::UrlEncoded("minProtein".into(), "0".into()),
            Matcher::UrlEncoded("type".into(), "main course".into()),
            Matcher::UrlEncoded("addRecipeNutrition".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [
                    {
                        "id": 10,
                        "title": "Lean Chili",
                        "nutrition": {"nutrients": [
                            {"name": "Calories", "amount": 420.5, "unit": "kcal"},
                            {"name": "Protein", "amount": 35.0, "unit": "g"},
                            {"name": "Fat", "amount": 9.0, "unit": "g"},
                            {"name": "Carbohydrates", "amount": 41.0, "unit": "g"}
                        ]}
                    },
                    {"id": 11, "title": "Mystery Stew"}
                ],
                "offset": 0,
                "number": 20,
                "totalResults": 2
            }"#,
        )
        .create_async()
        .await;

    let mut query = NutrientQuery::default();
    query.bounds.max_calories = 500.0;
    query.dish_type = Some("main course".to_string());

    let recipes = service(server.url()).find_by_nutrients(&query).await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].calories, 420.5);
    assert_eq!(recipes[0].protein, 35.0);
    assert_eq!(recipes[0].fat, 9.0);
    assert_eq!(recipes[0].carbs, 41.0);
    assert_eq!(recipes[1].calories, 0.0);
    assert_eq!(recipes[1].image, "placeholder.png");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_by_nutrients_requires_a_constraint() {
    let server = mockito::Server::new_async().await;
    let err = service(server.url())
        .find_by_nutrients(&NutrientQuery::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid request: At least one nutrient constraint must be provided"
    );
}

#[tokio::test]
async fn test_search_by_name_reads_nutrients_by_name() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::UrlEncoded("query".into(), "pasta".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": [{
                "id": 20,
                "title": "Pasta Primavera",
                "image": "https://img.spoonacular.com/recipes/20.jpg",
                "nutrition": {"nutrients": [
                    {"name": "Carbohydrates", "amount": 60.0},
                    {"name": "Calories", "amount": 510.0},
                    {"name": "Sugar", "amount": 8.0},
                    {"name": "Protein", "amount": 18.0}
                ]}
            }]}"#,
        )
        .create_async()
        .await;

    let recipes = service(server.url())
        .search_by_name(&NameQuery::new("pasta"))
        .await
        .unwrap();

    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.calories, 510.0);
    assert_eq!(recipe.carbs, 60.0);
    assert_eq!(recipe.protein, 18.0);
    assert_eq!(recipe.fat, 0.0);
    assert_eq!(recipe.image, "https://img.spoonacular.com/recipes/20.jpg");
}

#[tokio::test]
async fn test_configured_default_limit() {
    let mut server = mockito::Server::new_async().await;
    let hits: Vec<_> = (1..=5)
        .map(|id| serde_json::json!({"id": id, "title": format!("Pasta {id}")}))
        .collect();
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "results": hits }).to_string())
        .create_async()
        .await;

    let service = RecipeFinder::builder()
        .api_key("test_key")
        .base_url(server.url())
        .default_limit(2)
        .build()
        .unwrap();

    let recipes = service.search_by_name(&NameQuery::new("pasta")).await.unwrap();
    let ids: Vec<u64> = recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let mut query = NameQuery::new("pasta");
    query.limit = Some(4);
    assert_eq!(service.search_by_name(&query).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "invalid api key"}"#)
        .create_async()
        .await;

    let err = service(server.url())
        .search_by_name(&NameQuery::new("pasta"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 502);
    assert!(err.to_string().contains("status: 401"));
}

#[tokio::test]
async fn test_nutrition_summary() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/30/nutritionWidget.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "calories": "316",
                "nutrients": [
                    {"name": "Calories", "amount": 316.49, "unit": "kcal"},
                    {"name": "Fat", "amount": 12.09, "unit": "g"},
                    {"name": "Carbohydrates", "amount": 49.25, "unit": "g"},
                    {"name": "Protein", "amount": 3.88, "unit": "g"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let summary = service(server.url())
        .nutrition(30, Some("Banana Bread".to_string()), None)
        .await
        .unwrap();

    assert_eq!(summary.title, "Banana Bread");
    assert_eq!(summary.image, "placeholder.png");
    assert_eq!(summary.protein.as_deref(), Some("3.88g"));
    assert_eq!(summary.carbs.as_deref(), Some("49.25g"));
    assert_eq!(summary.fat.as_deref(), Some("12.09g"));
}
