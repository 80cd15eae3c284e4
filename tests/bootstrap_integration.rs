//! End-to-end tests over an in-memory database: startup seeding, the
//! permission model, the referential-integrity guard and sort-order
//! assignment working together the way the API handlers drive them.

use techpress_server::core::{Config, ServerState};
use techpress_server::db::models::{
    Action, CategoryCreate, CommentCreate, Resource, ReviewCreate, SubcategoryCreate, UserCreate,
};
use techpress_server::db::repository::{
    CategoryRepository, CommentRepository, RepoError, ReviewRepository, RoleRepository,
    SubcategoryRepository, UserRepository,
};

async fn test_state() -> ServerState {
    ServerState::initialize(&Config::for_tests())
        .await
        .expect("state initialization")
}

fn category_payload(name: &str, sort_order: Option<i32>) -> CategoryCreate {
    CategoryCreate {
        name: name.to_string(),
        group: Some("gadgets".to_string()),
        description: format!("All about {name}"),
        icon: None,
        image: None,
        color: None,
        sort_order,
        meta_title: None,
        meta_description: None,
    }
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let state = test_state().await;
    let roles = RoleRepository::new(state.db.clone());

    // initialize() already seeded once; a second pass inserts nothing
    let inserted = roles.seed_default_roles().await.expect("reseed");
    assert_eq!(inserted, 0);

    let all = roles.find_all().await.expect("list roles");
    assert_eq!(all.len(), 5);

    // Grants survive the second pass unchanged
    let editor = roles
        .find_by_name("EDITOR")
        .await
        .expect("query")
        .expect("EDITOR exists");
    assert!(editor.has_permission(Resource::Reviews, Action::Publish));
    assert!(!editor.has_permission(Resource::Categories, Action::Create));
}

#[tokio::test]
async fn test_permission_scenario_editor_vs_admin() {
    let state = test_state().await;
    let roles = RoleRepository::new(state.db.clone());

    let editor = roles.find_by_name("EDITOR").await.unwrap().unwrap();
    let admin = roles.find_by_name("ADMIN").await.unwrap().unwrap();

    assert!(!editor.has_permission(Resource::Categories, Action::Create));
    assert!(admin.has_permission(Resource::Categories, Action::Create));
}

#[tokio::test]
async fn test_sort_order_assignment_on_create() {
    let state = test_state().await;
    let categories = CategoryRepository::new(state.db.clone());

    let first = categories
        .create(category_payload("Smartphones", None), None)
        .await
        .expect("create first");
    assert_eq!(first.sort_order, 1);

    let second = categories
        .create(category_payload("Laptops", None), None)
        .await
        .expect("create second");
    assert_eq!(second.sort_order, 2);

    // Explicit free value is honoured
    let third = categories
        .create(category_payload("Wearables", Some(10)), None)
        .await
        .expect("create third");
    assert_eq!(third.sort_order, 10);

    // Explicit taken value names the holder and changes nothing
    let err = categories
        .create(category_payload("Tablets", Some(10)), None)
        .await
        .unwrap_err();
    match err {
        RepoError::SortConflict { value, holder } => {
            assert_eq!(value, 10);
            assert_eq!(holder, "Wearables");
        }
        other => panic!("expected SortConflict, got {other:?}"),
    }

    // Auto-assignment continues after the maximum
    let fourth = categories
        .create(category_payload("Tablets", None), None)
        .await
        .expect("create fourth");
    assert_eq!(fourth.sort_order, 11);
}

#[tokio::test]
async fn test_usage_guard_blocks_referenced_category() {
    let state = test_state().await;
    let categories = CategoryRepository::new(state.db.clone());
    let subcategories = SubcategoryRepository::new(state.db.clone());
    let reviews = ReviewRepository::new(state.db.clone());

    let category = categories
        .create(category_payload("Smartphones", None), None)
        .await
        .expect("create category");
    let category_id = category.id.clone().expect("id").to_string();

    for name in ["Android Phones", "iPhones", "Foldables"] {
        subcategories
            .create(
                SubcategoryCreate {
                    name: name.to_string(),
                    description: format!("{name} under test"),
                    category: category_id.clone(),
                    icon: None,
                    image: None,
                    sort_order: None,
                    meta_title: None,
                    meta_description: None,
                },
                None,
            )
            .await
            .expect("create subcategory");
    }

    let sub = subcategories
        .find_by_slug("android-phones")
        .await
        .expect("query")
        .expect("subcategory exists");
    let sub_id = sub.id.clone().expect("id").to_string();

    for title in ["Pixel 10 Review", "Galaxy S26 Review"] {
        reviews
            .create(
                ReviewCreate {
                    title: title.to_string(),
                    excerpt: "Short take".to_string(),
                    content: "x".repeat(200),
                    category: category_id.clone(),
                    subcategory: sub_id.clone(),
                    product_name: title.trim_end_matches(" Review").to_string(),
                    rating: Some(8.5),
                    pros: vec!["battery".to_string()],
                    cons: vec![],
                    verdict: None,
                },
                None,
            )
            .await
            .expect("create review");
    }

    let report = state.usage_guard.check_usage("category", &category_id).await;
    assert!(report.is_used);
    assert_eq!(report.dependencies.get("subcategories"), Some(&3));
    assert_eq!(report.dependencies.get("reviews"), Some(&2));
    assert!(report.message.contains("used in 3 subcategories"));
    assert!(report.message.contains("used in 2 reviews"));
    assert!(report.degraded.is_empty());

    // A fresh category with no dependents is deletable
    let lonely = categories
        .create(category_payload("Drones", None), None)
        .await
        .expect("create lonely category");
    let lonely_id = lonely.id.clone().expect("id").to_string();
    let report = state.usage_guard.check_usage("category", &lonely_id).await;
    assert!(!report.is_used);
    assert!(report.message.is_empty());
    assert!(report.dependencies.is_empty());

    assert!(categories.delete(&lonely_id).await.expect("delete"));
}

#[tokio::test]
async fn test_usage_guard_clears_after_dependents_removed() {
    let state = test_state().await;
    let categories = CategoryRepository::new(state.db.clone());
    let subcategories = SubcategoryRepository::new(state.db.clone());

    let category = categories
        .create(category_payload("Audio", None), None)
        .await
        .expect("create category");
    let category_id = category.id.clone().expect("id").to_string();

    let sub = subcategories
        .create(
            SubcategoryCreate {
                name: "Headphones".to_string(),
                description: "Over and in ear".to_string(),
                category: category_id.clone(),
                icon: None,
                image: None,
                sort_order: None,
                meta_title: None,
                meta_description: None,
            },
            None,
        )
        .await
        .expect("create subcategory");
    let sub_id = sub.id.clone().expect("id").to_string();

    assert!(state.usage_guard.check_usage("category", &category_id).await.is_used);

    subcategories.delete(&sub_id).await.expect("delete subcategory");

    let report = state.usage_guard.check_usage("category", &category_id).await;
    assert!(!report.is_used);
    assert!(report.dependencies.is_empty());
}

#[tokio::test]
async fn test_comments_block_review_deletion() {
    let state = test_state().await;
    let categories = CategoryRepository::new(state.db.clone());
    let subcategories = SubcategoryRepository::new(state.db.clone());
    let reviews = ReviewRepository::new(state.db.clone());
    let comments = CommentRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());
    let roles = RoleRepository::new(state.db.clone());

    let category = categories
        .create(category_payload("Cameras", None), None)
        .await
        .expect("create category");
    let category_id = category.id.clone().expect("id").to_string();

    let sub = subcategories
        .create(
            SubcategoryCreate {
                name: "Mirrorless".to_string(),
                description: "Interchangeable lens".to_string(),
                category: category_id.clone(),
                icon: None,
                image: None,
                sort_order: None,
                meta_title: None,
                meta_description: None,
            },
            None,
        )
        .await
        .expect("create subcategory");

    let review = reviews
        .create(
            ReviewCreate {
                title: "A7 V Review".to_string(),
                excerpt: "Short take".to_string(),
                content: "y".repeat(200),
                category: category_id.clone(),
                subcategory: sub.id.clone().expect("id").to_string(),
                product_name: "A7 V".to_string(),
                rating: Some(9.0),
                pros: vec![],
                cons: vec![],
                verdict: None,
            },
            None,
        )
        .await
        .expect("create review");
    let review_id = review.id.clone().expect("id").to_string();

    let user_role = roles.find_by_name("USER").await.unwrap().unwrap();
    let author = users
        .create(UserCreate {
            username: "commenter".to_string(),
            email: "commenter@example.com".to_string(),
            password: "a-long-password".to_string(),
            first_name: None,
            last_name: None,
            role: user_role.id.expect("role id").to_string(),
            bio: None,
        })
        .await
        .expect("create user");

    comments
        .create(
            CommentCreate {
                content: "Great review!".to_string(),
                review: Some(review_id.clone()),
                tech_news: None,
                parent: None,
            },
            author.id.expect("user id"),
        )
        .await
        .expect("create comment");

    let report = state.usage_guard.check_usage("review", &review_id).await;
    assert!(report.is_used);
    assert_eq!(report.dependencies.get("comments"), Some(&1));
}

#[tokio::test]
async fn test_login_credentials_roundtrip() {
    let state = test_state().await;
    let roles = RoleRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());

    let editor_role = roles.find_by_name("EDITOR").await.unwrap().unwrap();
    let user = users
        .create(UserCreate {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "correct-horse-battery".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: None,
            role: editor_role.id.expect("role id").to_string(),
            bio: None,
        })
        .await
        .expect("create user");

    assert!(user.verify_password("correct-horse-battery").expect("verify"));
    assert!(!user.verify_password("wrong-password").expect("verify"));

    // Duplicate usernames are rejected
    let err = users
        .create(UserCreate {
            username: "jane".to_string(),
            email: "jane2@example.com".to_string(),
            password: "another-password".to_string(),
            first_name: None,
            last_name: None,
            role: "role:whatever".to_string(),
            bio: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
