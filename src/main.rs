use clap::{Args, Parser, Subcommand};
use log::error;
use serde::Serialize;
use serde_json::json;

use recipe_finder::favorites::store_from_config;
use recipe_finder::{
    load_config, parse_ingredient_list, AppConfig, IngredientQuery, NameQuery, NewFavorite,
    NutrientBounds, NutrientQuery, Ranking, RecipeError, RecipeService,
};

#[derive(Parser)]
#[command(name = "recipe-finder", version, about = "Find recipes through the Spoonacular API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recipes that use the given comma-separated ingredients
    ByIngredients(ByIngredients),
    /// Recipes within nutrient ranges
    ByNutrients(ByNutrients),
    /// Recipes whose name matches a query
    ByName(ByName),
    /// One recipe with ingredient matching and numbered instructions
    Show(Show),
    /// Protein, carbs and fat of one recipe
    Nutrients(Nutrients),
    /// Manage a user's favorites
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Args)]
struct Page {
    /// Page size; defaults to `search.default_limit` from the configuration
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long, default_value_t = 0)]
    offset: usize,
}

#[derive(Args)]
struct ByIngredients {
    ingredients: String,
    #[command(flatten)]
    page: Page,
    /// 1: maximize used ingredients, 2: minimize missing ingredients
    #[arg(long, default_value_t = 1)]
    ranking: u8,
    /// Count pantry staples (water, salt, flour...) as ingredients
    #[arg(long)]
    include_pantry: bool,
    #[arg(long)]
    dish_type: Option<String>,
}

#[derive(Args)]
struct ByNutrients {
    #[arg(long, default_value_t = 0.0)]
    min_calories: f64,
    #[arg(long, default_value_t = 10_000.0)]
    max_calories: f64,
    #[arg(long, default_value_t = 0.0)]
    min_protein: f64,
    #[arg(long, default_value_t = 1_000.0)]
    max_protein: f64,
    #[arg(long, default_value_t = 0.0)]
    min_fat: f64,
    #[arg(long, default_value_t = 1_000.0)]
    max_fat: f64,
    #[arg(long, default_value_t = 0.0)]
    min_carbs: f64,
    #[arg(long, default_value_t = 1_000.0)]
    max_carbs: f64,
    #[command(flatten)]
    page: Page,
    #[arg(long)]
    dish_type: Option<String>,
}

#[derive(Args)]
struct ByName {
    query: String,
    #[command(flatten)]
    page: Page,
}

#[derive(Args)]
struct Show {
    id: u64,
    /// Comma-separated ingredients you have
    #[arg(long)]
    ingredients: Option<String>,
}

#[derive(Args)]
struct Nutrients {
    id: u64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorites
    List {
        #[arg(long)]
        user: String,
    },
    /// Add a recipe, or remove it if it is already a favorite
    Toggle {
        #[arg(long)]
        user: String,
        #[arg(long)]
        recipe_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        url: String,
    },
    /// Remove a favorite
    Remove {
        #[arg(long)]
        user: String,
        #[arg(long)]
        recipe_id: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!("{}", e);
        eprintln!("{}", json!({ "error": e.to_string(), "status": e.status_code() }));
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), RecipeError> {
    let config = load_config()?;
    let service = RecipeService::from_config(&config)?;

    match command {
        Command::ByIngredients(args) => {
            let query = IngredientQuery {
                ingredients: args
                    .ingredients
                    .split(',')
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .map(String::from)
                    .collect(),
                limit: args.page.limit,
                offset: args.page.offset,
                ranking: Ranking::try_from(args.ranking)?,
                ignore_pantry: !args.include_pantry,
                dish_type: args.dish_type,
            };
            print(&service.find_by_ingredients(&query).await?)
        }
        Command::ByNutrients(args) => {
            let query = NutrientQuery {
                bounds: NutrientBounds {
                    min_calories: args.min_calories,
                    max_calories: args.max_calories,
                    min_protein: args.min_protein,
                    max_protein: args.max_protein,
                    min_fat: args.min_fat,
                    max_fat: args.max_fat,
                    min_carbs: args.min_carbs,
                    max_carbs: args.max_carbs,
                },
                limit: args.page.limit,
                offset: args.page.offset,
                dish_type: args.dish_type,
            };
            print(&service.find_by_nutrients(&query).await?)
        }
        Command::ByName(args) => {
            let query = NameQuery {
                query: args.query,
                limit: args.page.limit,
                offset: args.page.offset,
            };
            print(&service.search_by_name(&query).await?)
        }
        Command::Show(args) => {
            let ingredients = args
                .ingredients
                .as_deref()
                .map(parse_ingredient_list)
                .unwrap_or_default();
            let detail = service.recipe_detail(args.id, ingredients).await?;
            print(&detail)
        }
        Command::Nutrients(args) => {
            print(&service.nutrition(args.id, args.title, args.image).await?)
        }
        Command::Favorites(command) => run_favorites(&config, command).await,
    }
}

async fn run_favorites(config: &AppConfig, command: FavoritesCommand) -> Result<(), RecipeError> {
    let store = store_from_config(&config.favorites);
    match command {
        FavoritesCommand::List { user } => print(&store.list(&user).await?),
        FavoritesCommand::Toggle {
            user,
            recipe_id,
            title,
            image,
            url,
        } => {
            let favorite = NewFavorite {
                recipe_id,
                recipe_title: title,
                recipe_image: image,
                view_recipe_url: url,
            };
            print(&store.toggle(&user, favorite).await?)
        }
        FavoritesCommand::Remove { user, recipe_id } => {
            print(&store.remove(&user, &recipe_id).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), RecipeError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
