use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建辅导员表
        manager
            .create_table(
                Table::create()
                    .table(Tutors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tutors::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tutors::Fname).string().null())
                    .col(ColumnDef::new(Tutors::Lname).string().null())
                    .col(ColumnDef::new(Tutors::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Tutors::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Tutors::IsSuperuser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tutors::IsWorking)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Number)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().null())
                    .col(
                        ColumnDef::new(Courses::OnDisplay)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建辅导员-课程关联表
        manager
            .create_table(
                Table::create()
                    .table(CanTutor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CanTutor::TutorEmail).string().not_null())
                    .col(ColumnDef::new(CanTutor::CourseId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CanTutor::TutorEmail)
                            .col(CanTutor::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CanTutor::Table, CanTutor::TutorEmail)
                            .to(Tutors::Table, Tutors::Email)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CanTutor::Table, CanTutor::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期表
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semesters::Year).big_integer().not_null())
                    .col(ColumnDef::new(Semesters::Season).string().not_null())
                    .col(ColumnDef::new(Semesters::StartDate).date().not_null())
                    .col(ColumnDef::new(Semesters::EndDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教授表
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::Fname).string().not_null())
                    .col(ColumnDef::new(Professors::Lname).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程班次表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::Number).big_integer().not_null())
                    .col(ColumnDef::new(Sections::Time).string().null())
                    .col(ColumnDef::new(Sections::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Sections::SemesterId).big_integer().null())
                    .col(ColumnDef::new(Sections::ProfessorId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建问题类型表
        manager
            .create_table(
                Table::create()
                    .table(ProblemTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProblemTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProblemTypes::Description)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建公告表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::Message).text().not_null())
                    .col(ColumnDef::new(Messages::StartDate).date().null())
                    .col(ColumnDef::new(Messages::EndDate).date().null())
                    .to_owned(),
            )
            .await?;

        // 创建工单表
        // section_id 在应用层为必填，但删除班次时需要置空，所以列允许 NULL
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::StudentEmail).string().not_null())
                    .col(ColumnDef::new(Tickets::StudentFname).string().null())
                    .col(ColumnDef::new(Tickets::StudentLname).string().null())
                    .col(ColumnDef::new(Tickets::Assignment).string().null())
                    .col(ColumnDef::new(Tickets::Question).text().null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(Tickets::TimeCreated)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::TimeClosed).big_integer().null())
                    .col(ColumnDef::new(Tickets::WasSuccessful).boolean().null())
                    .col(ColumnDef::new(Tickets::TutorEmail).string().null())
                    .col(
                        ColumnDef::new(Tickets::AssistantTutorEmail)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(Tickets::SectionId).big_integer().null())
                    .col(ColumnDef::new(Tickets::ProblemTypeId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tickets::Table, Tickets::TutorEmail)
                            .to(Tutors::Table, Tutors::Email)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tickets::Table, Tickets::AssistantTutorEmail)
                            .to(Tutors::Table, Tutors::Email)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tickets::Table, Tickets::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tickets::Table, Tickets::ProblemTypeId)
                            .to(ProblemTypes::Table, ProblemTypes::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 工单索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_time_created")
                    .table(Tickets::Table)
                    .col(Tickets::TimeCreated)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_status")
                    .table(Tickets::Table)
                    .col(Tickets::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sections_course_id")
                    .table(Sections::Table)
                    .col(Sections::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProblemTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CanTutor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tutors::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tutors {
    Table,
    Email,
    Fname,
    Lname,
    PasswordHash,
    IsActive,
    IsSuperuser,
    IsWorking,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Number,
    Name,
    OnDisplay,
}

#[derive(DeriveIden)]
enum CanTutor {
    Table,
    TutorEmail,
    CourseId,
}

#[derive(DeriveIden)]
enum Semesters {
    Table,
    Id,
    Year,
    Season,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Professors {
    Table,
    Id,
    Fname,
    Lname,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    Number,
    Time,
    CourseId,
    SemesterId,
    ProfessorId,
}

#[derive(DeriveIden)]
enum ProblemTypes {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    Message,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    StudentEmail,
    StudentFname,
    StudentLname,
    Assignment,
    Question,
    Status,
    TimeCreated,
    TimeClosed,
    WasSuccessful,
    TutorEmail,
    AssistantTutorEmail,
    SectionId,
    ProblemTypeId,
}
