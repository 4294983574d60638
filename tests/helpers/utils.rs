use chrono::NaiveDate;
use jsonwebtoken::{encode, EncodingKey, Header};
use pawhome_domain::{Pet, User, ID};
use pawhome_infra::PawContext;
use serde_json::{json, Value};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

pub fn bearer(ctx: &PawContext, user: &User) -> (String, String) {
    let claims = json!({
        "exp": 5609418990073_u64,
        "userId": user.id.to_string(),
    });
    let key = EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &key).expect("To encode token");
    ("Authorization".to_string(), format!("Bearer {}", token))
}

pub fn admin_secret(ctx: &PawContext) -> (String, String) {
    (
        "pawhome-admin-secret".to_string(),
        ctx.config.admin_secret.clone(),
    )
}

pub async fn insert_pet(ctx: &PawContext, name: &str, foundation_id: &ID) -> Pet {
    let pet = Pet::new(name, "dog", Some(foundation_id.clone()));
    ctx.repos.pets.insert(&pet).await.unwrap();
    pet
}

pub async fn insert_user(ctx: &PawContext, name: &str, email: &str) -> User {
    let user = User::new(name, email);
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

pub async fn insert_foundation_member(ctx: &PawContext, foundation_id: &ID) -> User {
    let member = User::foundation_member("Rescue team", "team@rescue.org", foundation_id.clone());
    ctx.repos.users.insert(&member).await.unwrap();
    member
}

pub fn adoption_form(pet: &Pet, user: &User) -> Value {
    json!({
        "petId": pet.id.to_string(),
        "fullName": user.name,
        "email": user.email,
        "phone": "+57 300 000 0000",
        "address": "Calle 10 #20-30",
        "city": "Medellin",
        "housingType": "apartment",
        "hasYard": false,
        "hasOtherPets": true,
        "hasChildren": false,
        "motivation": "Looking for a calm companion"
    })
}
