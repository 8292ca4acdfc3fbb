use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

/// Participants (raffle pool)
#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    Name,
    Active,
    CreatedAt,
}

/// Prizes up for drawing
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    Description,
    Image,
    Drawn,
    CreatedAt,
}

/// Win records (one per drawn prize)
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    ParticipantId,
    PrizeId,
    ParticipantName,
    PrizeName,
    PrizeImage,
    DrawnAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Schema notes:
/// - participant names are unique; bulk insert relies on ON CONFLICT DO NOTHING
/// - winners snapshots participant/prize names so history survives edits
/// - foreign keys carry no ON DELETE action: dependent win records are removed
///   explicitly by the delete operations, inside the same transaction
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // one row per person
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_name_unique")
                    .table(Participants::Table)
                    .col(Participants::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::Description).text().null())
                    .col(ColumnDef::new(Prizes::Image).string_len(512).null())
                    .col(
                        ColumnDef::new(Prizes::Drawn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Winners::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Winners::ParticipantName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::PrizeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Winners::PrizeImage).string_len(512).null())
                    .col(
                        ColumnDef::new(Winners::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // inline constraints: SQLite cannot add foreign keys after the fact
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_participant")
                            .from(Winners::Table, Winners::ParticipantId)
                            .to(Participants::Table, Participants::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_prize")
                            .from(Winners::Table, Winners::PrizeId)
                            .to(Prizes::Table, Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_participant")
                    .table(Winners::Table)
                    .col(Winners::ParticipantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .to_owned(),
            )
            .await?;

        // Demo data so a fresh install has something to raffle. Names
        // conflict-skip, so running against an existing database never
        // duplicates anyone.
        let conn = manager.get_connection();
        let seed_participants = r#"
INSERT INTO participants (name)
VALUES
 ('Juan Carlos Pérez'), ('María Fernanda García'), ('Carlos Andrés López'),
 ('Ana María Rodríguez'), ('Pedro Pablo Martínez'), ('Laura Valentina Sánchez'),
 ('Diego Alejandro Torres'), ('Sofía Isabella Ramírez'), ('Andrés Felipe Vargas'),
 ('Camila Andrea Morales'), ('Luis Miguel Herrera'), ('Valentina Castro'),
 ('Santiago Gómez'), ('Daniela Ospina'), ('Julián Restrepo'),
 ('Natalia Mejía'), ('Sebastián Cardona'), ('Paula Andrea Ríos'),
 ('Alejandro Muñoz'), ('Carolina Duque'), ('Felipe Aristizábal'),
 ('Mariana Salazar'), ('Nicolás Bedoya'), ('Isabela Montoya'),
 ('David Escobar'), ('Gabriela Henao'), ('Mateo Valencia'),
 ('Luciana Arango'), ('Tomás Londoño'), ('Valeria Zapata'),
 ('Roberto Jiménez'), ('Patricia Moreno'), ('Fernando Ruiz'),
 ('Claudia Ortiz'), ('Jorge Mendoza'), ('Andrea Vargas'),
 ('Ricardo Peña'), ('Mónica Soto'), ('Eduardo Silva'),
 ('Sandra Guerrero'), ('Oscar Medina'), ('Diana Rojas'),
 ('Gustavo Paredes'), ('Liliana Torres'), ('Héctor Navarro'),
 ('Martha Campos'), ('Raúl Flores'), ('Gloria Vega'),
 ('Iván Córdoba'), ('Lucía Mendez')
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            seed_participants.to_string(),
        ))
        .await?;

        let seed_prizes = r#"
INSERT INTO prizes (name, description)
VALUES
 ('Televisor 55"', 'Smart TV 4K Samsung'),
 ('Bono $500.000', 'Bono en efectivo'),
 ('Licuadora Ninja', 'Licuadora profesional'),
 ('Audífonos Bluetooth', 'Sony WH-1000XM4'),
 ('Día Libre', 'Un día libre con goce de sueldo');
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            seed_prizes.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop order: records first, then the referenced tables
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
