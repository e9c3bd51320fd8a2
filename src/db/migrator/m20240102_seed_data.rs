use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::entities::{crew_members, pirate_groups, users};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Hash a seed password with Argon2id. Only hashes ever reach the store;
/// the plaintext seed credentials exist nowhere but this file.
fn hash_seed_password(password: &str) -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash seed password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        seed_users(conn).await?;
        seed_pirate_groups(conn).await?;
        seed_crew_members(conn).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        crew_members::Entity::delete_many().exec(conn).await?;
        pirate_groups::Entity::delete_many().exec(conn).await?;
        users::Entity::delete_many().exec(conn).await?;

        Ok(())
    }
}

/// Seed the two fixed accounts. Skipped entirely if any user already exists.
async fn seed_users(conn: &impl ConnectionTrait) -> Result<(), DbErr> {
    if users::Entity::find().count(conn).await? > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();
    let accounts = [("admin", "admin123"), ("user", "user123")];

    users::Entity::insert_many(accounts.map(|(username, password)| users::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_seed_password(password)),
        created_at: Set(now.clone()),
        ..Default::default()
    }))
    .exec(conn)
    .await?;

    Ok(())
}

struct GroupSeed {
    name: &'static str,
    captain: &'static str,
    ship_name: &'static str,
    total_bounty: &'static str,
    flag_description: &'static str,
    origin: &'static str,
    member_count: i32,
    description: &'static str,
}

const GROUP_CATALOG: [GroupSeed; 5] = [
    GroupSeed {
        name: "Straw Hat Pirates",
        captain: "Monkey D. Luffy",
        ship_name: "Thousand Sunny",
        total_bounty: "8,816,001,000 Berries",
        flag_description: "Skull wearing a straw hat",
        origin: "East Blue",
        member_count: 10,
        description: "Crew founded by Monkey D. Luffy, sailing to find the One Piece \
                      and crown him King of the Pirates. The members treat each other \
                      as family and have weathered countless adventures together.",
    },
    GroupSeed {
        name: "Red Hair Pirates",
        captain: "Shanks",
        ship_name: "Red Force",
        total_bounty: "Over 4,048,900,000 Berries",
        flag_description: "Skull with three scars across the left eye",
        origin: "West Blue",
        member_count: 10,
        description: "Crew led by the Emperor Shanks. Small in number but every \
                      member is an elite fighter.",
    },
    GroupSeed {
        name: "Whitebeard Pirates",
        captain: "Edward Newgate (deceased)",
        ship_name: "Moby Dick",
        total_bounty: "Unknown",
        flag_description: "Skull over a crossed manji",
        origin: "New World",
        member_count: 1600,
        description: "Once the strongest crew in the world. Whitebeard called every \
                      one of his crewmen his son.",
    },
    GroupSeed {
        name: "Blackbeard Pirates",
        captain: "Marshall D. Teach",
        ship_name: "Saber of Xebec",
        total_bounty: "Over 3,996,000,000 Berries",
        flag_description: "Three skulls",
        origin: "Grand Line",
        member_count: 10,
        description: "Crew of the Emperor Blackbeard, whose captain wields both the \
                      Tremor-Tremor and Dark-Dark Fruits.",
    },
    GroupSeed {
        name: "Heart Pirates",
        captain: "Trafalgar Law",
        ship_name: "Polar Tang",
        total_bounty: "Over 3,000,000,000 Berries",
        flag_description: "Smiling skull",
        origin: "North Blue",
        member_count: 21,
        description: "Crew led by Trafalgar Law, travelling by submarine; most of the \
                      members are medical personnel.",
    },
];

async fn seed_pirate_groups(conn: &impl ConnectionTrait) -> Result<(), DbErr> {
    if pirate_groups::Entity::find().count(conn).await? > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    pirate_groups::Entity::insert_many(GROUP_CATALOG.map(|g| pirate_groups::ActiveModel {
        name: Set(g.name.to_string()),
        captain: Set(g.captain.to_string()),
        ship_name: Set(Some(g.ship_name.to_string())),
        total_bounty: Set(Some(g.total_bounty.to_string())),
        flag_description: Set(Some(g.flag_description.to_string())),
        origin: Set(Some(g.origin.to_string())),
        member_count: Set(g.member_count),
        description: Set(Some(g.description.to_string())),
        created_at: Set(now.clone()),
        ..Default::default()
    }))
    .exec(conn)
    .await?;

    Ok(())
}

struct MemberSeed {
    name: &'static str,
    role: &'static str,
    bounty: &'static str,
    image_url: &'static str,
    description: &'static str,
    devil_fruit: &'static str,
    haki_types: &'static str,
    special_skills: &'static str,
    signature_moves: &'static str,
}

const STRAW_HAT_ROSTER: [MemberSeed; 10] = [
    MemberSeed {
        name: "Monkey D. Luffy",
        role: "Captain",
        bounty: "3,000,000,000 Berries",
        image_url: "/images/luffy.jpg",
        description: "Rubber man with boundless optimism, an iron will and a gift \
                      for battle. Values his crew above everything.",
        devil_fruit: "Gomu Gomu no Mi (Nika form)",
        haki_types: "Conqueror's, Armament, Observation",
        special_skills: "Gear Fourth, Gear Fifth",
        signature_moves: "Gum-Gum Red Roc, Gum-Gum Elephant Gun, Gum-Gum Bajrang Gun",
    },
    MemberSeed {
        name: "Roronoa Zoro",
        role: "Combatant / Swordsman",
        bounty: "1,111,000,000 Berries",
        image_url: "/images/zoro.jpg",
        description: "Three-sword-style swordsman who dreams of becoming the world's \
                      greatest. Hopeless with directions, but the crew's second \
                      strongest fighter.",
        devil_fruit: "None",
        haki_types: "Armament, Observation, Conqueror's",
        special_skills: "Three Sword Style, the cursed blade Enma",
        signature_moves: "Three Thousand Worlds, Nine Sword Style Asura, King of Hell Style",
    },
    MemberSeed {
        name: "Nami",
        role: "Navigator",
        bounty: "366,000,000 Berries",
        image_url: "/images/nami.jpg",
        description: "Genius navigator with an uncanny sense for the weather. Loves \
                      money, cares deeply for her crewmates.",
        devil_fruit: "None",
        haki_types: "None",
        special_skills: "Weather prediction, Sorcery Clima-Tact, Zeus",
        signature_moves: "Thunderbolt Tempo, Thunder Lance Tempo, Thundercloud Weather",
    },
    MemberSeed {
        name: "Usopp",
        role: "Sniper",
        bounty: "500,000,000 Berries",
        image_url: "/images/usopp.jpg",
        description: "Brilliant sniper and inventor with extraordinary range. A \
                      coward and a braggart who always comes through when it counts.",
        devil_fruit: "None",
        haki_types: "Observation",
        special_skills: "Extreme long-range sniping, Kuro Kabuto slingshot",
        signature_moves: "Green Star arsenal, Fire Bird Star, Green Star: Impact Wolf Grass",
    },
    MemberSeed {
        name: "Sanji",
        role: "Cook",
        bounty: "1,032,000,000 Berries",
        image_url: "/images/sanji.jpg",
        description: "First-rate cook who fights only with his legs to protect his \
                      hands. Dreams of finding the All Blue.",
        devil_fruit: "None",
        haki_types: "Armament, Observation",
        special_skills: "Black Leg Style, Diable Jambe, exoskeleton",
        signature_moves: "Collier Shoot, Mouton Shot, Boeuf Burst, Ifrit Jambe",
    },
    MemberSeed {
        name: "Tony Tony Chopper",
        role: "Doctor",
        bounty: "1,000 Berries",
        image_url: "/images/chopper.jpg",
        description: "A talking reindeer who ate the Human-Human Fruit. A gifted, \
                      kind-hearted physician.",
        devil_fruit: "Hito Hito no Mi",
        haki_types: "None",
        special_skills: "Seven transformation points, Rumble Ball enhancement",
        signature_moves: "Horn Point, Arm Point, Guard Point, Monster Point",
    },
    MemberSeed {
        name: "Nico Robin",
        role: "Archaeologist",
        bounty: "930,000,000 Berries",
        image_url: "/images/robin.jpg",
        description: "The only person alive who can read the Poneglyphs. Calm, \
                      mature and immensely knowledgeable.",
        devil_fruit: "Hana Hana no Mi",
        haki_types: "Armament",
        special_skills: "Sprouting body parts anywhere, giant limb form",
        signature_moves: "Mil Fleurs: Gigantesco Mano, Thousand Fleurs, Demonio Fleur",
    },
    MemberSeed {
        name: "Franky",
        role: "Shipwright",
        bounty: "394,000,000 Berries",
        image_url: "/images/franky.jpg",
        description: "Cyborg shipwright and builder of the Thousand Sunny, with \
                      weapons hidden all over his body.",
        devil_fruit: "None",
        haki_types: "None",
        special_skills: "Cyborg body, General Franky",
        signature_moves: "Coup de Vent, Radical Beam, Franky Fireball, Strong Hammer",
    },
    MemberSeed {
        name: "Brook",
        role: "Musician",
        bounty: "383,000,000 Berries",
        image_url: "/images/brook.jpg",
        description: "A skeleton revived by the Revive-Revive Fruit. A gentleman \
                      skilled in swordsmanship and music.",
        devil_fruit: "Yomi Yomi no Mi",
        haki_types: "None",
        special_skills: "Soul projection, chilling powers of the underworld",
        signature_moves: "Humming Arrow-Notch Slash, Prelude: Au Fer, Soul Requiem",
    },
    MemberSeed {
        name: "Jinbe",
        role: "Helmsman",
        bounty: "1,100,000,000 Berries",
        image_url: "/images/jinbe.jpg",
        description: "Fish-man karate master and former Warlord of the Sea. Steady, \
                      dependable and vastly experienced.",
        devil_fruit: "None",
        haki_types: "Armament, Observation",
        special_skills: "Fish-Man Karate, Fish-Man Jujutsu, underwater combat",
        signature_moves: "Vagabond Drill, Ocean Current Shoulder Throw, Shark Brick Fist",
    },
];

async fn seed_crew_members(conn: &impl ConnectionTrait) -> Result<(), DbErr> {
    if crew_members::Entity::find().count(conn).await? > 0 {
        return Ok(());
    }

    let straw_hat_id = pirate_groups::Entity::find()
        .filter(pirate_groups::Column::Name.eq("Straw Hat Pirates"))
        .one(conn)
        .await?
        .map(|g| g.id);

    let now = chrono::Utc::now().to_rfc3339();

    crew_members::Entity::insert_many(STRAW_HAT_ROSTER.map(|m| crew_members::ActiveModel {
        name: Set(m.name.to_string()),
        role: Set(m.role.to_string()),
        bounty: Set(m.bounty.to_string()),
        image_url: Set(Some(m.image_url.to_string())),
        description: Set(Some(m.description.to_string())),
        devil_fruit: Set(Some(m.devil_fruit.to_string())),
        haki_types: Set(Some(m.haki_types.to_string())),
        special_skills: Set(Some(m.special_skills.to_string())),
        signature_moves: Set(Some(m.signature_moves.to_string())),
        pirate_group_id: Set(straw_hat_id),
        created_at: Set(now.clone()),
        ..Default::default()
    }))
    .exec(conn)
    .await?;

    Ok(())
}
