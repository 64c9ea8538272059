#![allow(non_snake_case)]

use super::*;
use formforge_core::{
    Category, FieldDescriptor, FieldKind, FormStructure, RuleKind, ValidationRule,
};
use test_case::test_case;

fn plan_of(fields: Vec<FieldDescriptor>) -> FormPlan {
    let structure = fields
        .into_iter()
        .fold(FormStructure::new("T"), FormStructure::with_field);
    FormPlan::build(&structure, "Applicants").unwrap().0
}

fn applicants() -> FormPlan {
    plan_of(vec![
        FieldDescriptor::new("e", "Email", FieldKind::Email).required(),
        FieldDescriptor::new("a", "Age", FieldKind::Number)
            .with_rule(ValidationRule::new(RuleKind::Min).with_value(18.0)),
        FieldDescriptor::new("t", "Topics", FieldKind::MultiSelect),
    ])
}

fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a GeneratedFile {
    files
        .iter()
        .find(|f| f.archive_path() == path)
        .unwrap_or_else(|| panic!("missing {path}"))
}

#[test_case(BackendFramework::Express, BackendStyle::RouteHandler)]
#[test_case(BackendFramework::NestJs, BackendStyle::RouteHandler)]
#[test_case(BackendFramework::AspnetCore, BackendStyle::Annotation)]
#[test_case(BackendFramework::SpringBoot, BackendStyle::Annotation)]
fn BackendStyle_from___maps_framework(framework: BackendFramework, expected: BackendStyle) {
    assert_eq!(BackendStyle::from(framework), expected);
}

#[test]
fn emit_backend___express___emits_project_layout() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::RouteHandler).unwrap();

    let paths: Vec<String> = files.iter().map(GeneratedFile::archive_path).collect();
    assert_eq!(
        paths,
        vec![
            "backend/src/routes/applicants.routes.ts",
            "backend/src/controllers/applicants.controller.ts",
            "backend/src/validation/applicants.validation.ts",
            "backend/src/models/applicants.model.ts",
            "backend/src/repositories/applicants.repository.ts",
            "backend/src/data-source.ts",
            "backend/src/index.ts",
            "backend/package.json",
            "backend/tsconfig.json",
        ]
    );
    assert!(files.iter().all(|f| f.category() == Category::Backend));
}

#[test]
fn emit_backend___express_controller___uses_envelope_statuses() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::RouteHandler).unwrap();

    let code = file(&files, "backend/src/controllers/applicants.controller.ts").content();
    assert!(code.contains("res.status(201).json({ success: true, data: result"));
    assert!(code.contains("res.status(404).json({ success: false, message: 'Applicants not found' });"));
    assert!(code.contains("res.status(500).json({"));
    assert!(code.contains("message: 'Failed to create Applicants',"));
}

#[test]
fn emit_backend___express_validation___chains_required_and_format() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::RouteHandler).unwrap();

    let code = file(&files, "backend/src/validation/applicants.validation.ts").content();
    assert!(code.contains(
        "  body('email')\n    .notEmpty().withMessage('Email is required')\n    .bail()\n    .isEmail().withMessage('Invalid email address'),\n"
    ));
    assert!(code.contains("  body('age')\n    .optional({ values: 'falsy' })\n    .isNumeric()"));
    assert!(code.contains(".isFloat({ min: 18 }).withMessage('Must be at least 18')"));
    assert!(code.contains("message: 'Validation failed',"));
    assert!(code.contains("res.status(400)"));
}

#[test]
fn emit_backend___express_entity___maps_columns_to_schema_names() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::RouteHandler).unwrap();

    let code = file(&files, "backend/src/models/applicants.model.ts").content();
    assert!(code.contains("@Entity('applicants')"));
    assert!(code.contains("  @Column({ name: 'email', type: 'varchar' })\n  email!: string;\n"));
    assert!(code.contains("  @Column({ name: 'age', type: 'integer', nullable: true })\n  age?: number;\n"));
    assert!(code.contains("type: 'simple-array'"));
}

#[test]
fn emit_backend___express_routes___mounts_five_routes() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::RouteHandler).unwrap();

    let code = file(&files, "backend/src/routes/applicants.routes.ts").content();
    assert_eq!(code.matches("router.").count(), 5);
    assert!(code.contains("router.post('/', validateApplicants, controller.create);"));
    assert!(code.contains("router.put('/:id', validateApplicants, controller.update);"));
}

#[test]
fn emit_backend___aspnet___emits_project_layout() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::Annotation).unwrap();

    for path in [
        "backend/ApplicantsApi/Controllers/ApplicantsController.cs",
        "backend/ApplicantsApi/Models/Applicants.cs",
        "backend/ApplicantsApi/Models/ApiResponse.cs",
        "backend/ApplicantsApi/Models/PagedResult.cs",
        "backend/ApplicantsApi/DTOs/ApplicantsDtos.cs",
        "backend/ApplicantsApi/Services/IApplicantsService.cs",
        "backend/ApplicantsApi/Services/ApplicantsService.cs",
        "backend/ApplicantsApi/Data/AppDbContext.cs",
        "backend/ApplicantsApi/Program.cs",
        "backend/ApplicantsApi/ApplicantsApi.csproj",
    ] {
        file(&files, path);
    }
}

#[test]
fn emit_backend___aspnet_controller___wraps_results_in_envelope() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::Annotation).unwrap();

    let code = file(&files, "backend/ApplicantsApi/Controllers/ApplicantsController.cs").content();
    assert!(code.contains("return NotFound(ApiResponse<ApplicantsDto>.Fail(\"Applicants not found\"));"));
    assert!(code.contains("return CreatedAtAction(nameof(GetById), new { id = result.Id }"));
    assert!(code.contains("return StatusCode(500, ApiResponse<ApplicantsDto>.Fail(\"Failed to create Applicants\", ex.Message));"));
    assert!(code.contains("_logger.LogError(ex, \"Error getting Applicants {Id}\", id);"));
    assert_eq!(code.matches("catch (Exception ex)").count(), 5);
    assert!(code.ends_with("    }\n}\n"));
}

#[test]
fn emit_backend___aspnet_dtos___carry_data_annotations() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::Annotation).unwrap();

    let code = file(&files, "backend/ApplicantsApi/DTOs/ApplicantsDtos.cs").content();
    assert!(code.contains("    [Required(ErrorMessage = \"Email is required\")]\n    [EmailAddress(ErrorMessage = \"Invalid email address\")]\n    public string Email { get; set; } = string.Empty;\n"));
    assert!(code.contains("[Range(18, double.MaxValue, ErrorMessage = \"Must be at least 18\")]"));
    assert!(code.contains("public int? Age { get; set; }"));
    assert!(code.contains("public List<string>? Topics { get; set; }"));
    assert!(code.contains("public class CreateApplicantsDto"));
    assert!(code.contains("public class UpdateApplicantsDto"));
}

#[test]
fn emit_backend___aspnet_range___merges_min_and_max() {
    let plan = plan_of(vec![
        FieldDescriptor::new("a", "Age", FieldKind::Number)
            .with_rule(ValidationRule::new(RuleKind::Min).with_value(18.0))
            .with_rule(ValidationRule::new(RuleKind::Max).with_value(99.0)),
    ]);

    let files = emit_backend(&plan, "Applicants", BackendStyle::Annotation).unwrap();

    let code = file(&files, "backend/ApplicantsApi/DTOs/ApplicantsDtos.cs").content();
    assert_eq!(code.matches("[Range(").count(), 2);
    assert!(code.contains("[Range(18, 99, ErrorMessage = \"Must be between 18 and 99\")]"));
}

#[test]
fn emit_backend___aspnet_entity___matches_tsql_table() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::Annotation).unwrap();

    let code = file(&files, "backend/ApplicantsApi/Models/Applicants.cs").content();
    assert!(code.contains("[Table(\"Applicants\")]"));
    assert!(code.contains("    [Required]\n    [MaxLength(255)]\n    public string Email { get; set; } = string.Empty;"));
    assert!(code.contains("public bool IsDeleted { get; set; }"));
}

#[test]
fn emit_backend___aspnet_service___soft_deletes() {
    let files = emit_backend(&applicants(), "Applicants", BackendStyle::Annotation).unwrap();

    let code = file(&files, "backend/ApplicantsApi/Services/ApplicantsService.cs").content();
    assert!(code.contains("entity.IsDeleted = true;"));
    assert!(code.contains("Topics = SplitValues(entity.Topics),"));
    assert!(code.contains("entity.Topics = dto.Topics == null ? null : string.Join(\",\", dto.Topics);"));
}

#[test]
fn emit_backend_tests___express___tests_validation_when_required() {
    let files = emit_backend_tests(&applicants(), "Applicants", BackendStyle::RouteHandler);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].archive_path(), "backend/src/__tests__/applicants.routes.test.ts");
    assert_eq!(files[0].category(), Category::Tests);
    assert!(files[0].content().contains("rejects a body missing required fields"));
}

#[test]
fn emit_backend_tests___express_all_optional___skips_validation_test() {
    let plan = plan_of(vec![FieldDescriptor::new("n", "Notes", FieldKind::Textarea)]);

    let files = emit_backend_tests(&plan, "Applicants", BackendStyle::RouteHandler);

    assert!(!files[0].content().contains("rejects a body missing required fields"));
}

#[test]
fn emit_backend_tests___aspnet___emits_xunit_project() {
    let files = emit_backend_tests(&applicants(), "Applicants", BackendStyle::Annotation);

    let paths: Vec<String> = files.iter().map(GeneratedFile::archive_path).collect();
    assert_eq!(
        paths,
        vec![
            "backend/tests/ApplicantsApi.Tests/ApplicantsControllerTests.cs",
            "backend/tests/ApplicantsApi.Tests/ApplicantsApi.Tests.csproj",
        ]
    );
    assert!(files[0].content().contains("[Fact]"));
    assert!(files[1].content().contains("../../ApplicantsApi/ApplicantsApi.csproj"));
}

#[test]
fn endpoints___list_five_operations() {
    let resource = ProjectNames::new("Applicants");

    let express = endpoints(&resource, BackendStyle::RouteHandler);
    let dotnet = endpoints(&resource, BackendStyle::Annotation);

    assert_eq!(express.len(), 5);
    assert_eq!(express[0].1, "/api/applicants");
    assert_eq!(dotnet[2].1, "/api/Applicants/{id}");
}

#[test]
fn emit_backend___field_named_like_entity___gets_distinct_property() {
    let plan = plan_of(vec![FieldDescriptor::new("a", "Applicants", FieldKind::Text).required()]);

    let files = emit_backend(&plan, "Applicants", BackendStyle::Annotation).unwrap();

    let entity = file(&files, "backend/ApplicantsApi/Models/Applicants.cs").content();
    assert!(entity.contains("public class Applicants\n"));
    assert!(entity.contains(" Applicants2 { get; set; }"));
    assert!(!entity.contains(" Applicants { get; set; }"));
}
